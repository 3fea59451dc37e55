use crate::domain::records::{ClipRecord, VideoRecord};
use crate::error::CatalogError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Insert-or-replace a video row keyed by its id. Idempotent.
    async fn upsert_video(&self, record: &VideoRecord) -> Result<(), CatalogError>;

    /// Append a clip row. Not idempotent: re-running a batch duplicates rows
    /// unless the catalog enforces uniqueness itself.
    async fn insert_clip(&self, record: &ClipRecord) -> Result<(), CatalogError>;
}
