use crate::domain::media::{ClipPlan, Job, SourceMedia};
use crate::domain::records::{ClipRecord, VideoRecord};
use crate::error::{CatalogError, PublishError, StorageError};
use crate::ports::catalog::Catalog;
use crate::ports::storage::ObjectStore;
use std::future::Future;
use std::path::Path;
use std::time::Duration;
use tokio::time::timeout;

/// Upper bound on any single storage or catalog call unless reconfigured.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(120);

/// Distribution writer: pushes a local file into a bucket, verifies the
/// upload resolves publicly, then records it in the catalog.
///
/// The catalog write always comes after (or not at all, on failure) the
/// storage write. There is no cross-store transaction; a catalog failure
/// after a verified upload leaves the object in place.
pub struct Publisher<S, C> {
    store: S,
    catalog: C,
    videos_bucket: String,
    clips_bucket: String,
    call_timeout: Duration,
}

impl<S, C> Publisher<S, C>
where
    S: ObjectStore,
    C: Catalog,
{
    pub fn new(store: S, catalog: C, videos_bucket: String, clips_bucket: String) -> Self {
        Self {
            store,
            catalog,
            videos_bucket,
            clips_bucket,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    /// Upload the original asset, verify it resolves, then upsert its row.
    ///
    /// Aborts at the first failure, so a job whose asset never verifies
    /// leaves zero catalog rows.
    pub async fn publish_video(
        &self,
        job: &Job,
        media: &SourceMedia,
    ) -> Result<String, PublishError> {
        let key = media.file_name();
        let storage_path = self
            .upload(&media.local_path, &self.videos_bucket, &key)
            .await?;
        self.verify(&self.videos_bucket, &storage_path).await?;

        let record = VideoRecord::new(job, media, &storage_path);
        self.catalog_write(self.catalog.upsert_video(&record))
            .await?;

        Ok(storage_path)
    }

    /// Upload one cut clip, verify it resolves, then append its row.
    pub async fn publish_clip(
        &self,
        job: &Job,
        clip: &ClipPlan,
        local_path: &Path,
    ) -> Result<String, PublishError> {
        let storage_path = self
            .upload(local_path, &self.clips_bucket, &clip.file_name)
            .await?;
        self.verify(&self.clips_bucket, &storage_path).await?;

        let record = ClipRecord::new(job, clip, &storage_path);
        self.catalog_write(self.catalog.insert_clip(&record)).await?;

        Ok(storage_path)
    }

    async fn upload(&self, local: &Path, bucket: &str, key: &str) -> Result<String, PublishError> {
        match timeout(self.call_timeout, self.store.upload(local, bucket, key)).await {
            Ok(result) => result.map_err(PublishError::Upload),
            Err(_) => Err(PublishError::Upload(StorageError::TimedOut)),
        }
    }

    /// Best-effort existence check: the object must resolve to a non-empty
    /// public locator.
    async fn verify(&self, bucket: &str, key: &str) -> Result<(), PublishError> {
        let resolved = match timeout(self.call_timeout, self.store.public_url(bucket, key)).await {
            Ok(result) => result.map_err(PublishError::Upload)?,
            Err(_) => return Err(PublishError::Upload(StorageError::TimedOut)),
        };

        match resolved {
            Some(url) if !url.is_empty() => Ok(()),
            _ => Err(PublishError::Verification {
                bucket: bucket.to_string(),
                key: key.to_string(),
            }),
        }
    }

    async fn catalog_write(
        &self,
        call: impl Future<Output = Result<(), CatalogError>>,
    ) -> Result<(), PublishError> {
        match timeout(self.call_timeout, call).await {
            Ok(result) => result.map_err(PublishError::Catalog),
            Err(_) => Err(PublishError::Catalog(CatalogError::TimedOut)),
        }
    }
}
