use crate::domain::media::MediaInfo;
use crate::error::ProbeError;
use async_trait::async_trait;
use std::path::Path;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaProbe: Send + Sync {
    /// Read frame count and frame rate from a local media file.
    async fn probe(&self, path: &Path) -> Result<MediaInfo, ProbeError>;
}
