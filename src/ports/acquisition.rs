use crate::domain::media::SourceMedia;
use crate::error::AcquisitionError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Fetch the media behind `url` to a local file and return its metadata.
    ///
    /// On success the bytes exist at `SourceMedia::local_path`. The file is
    /// left on disk either way; cleanup is not this port's concern.
    async fn acquire(&self, url: &str) -> Result<SourceMedia, AcquisitionError>;
}
