use crate::error::CutError;
use async_trait::async_trait;
use std::path::Path;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClipCutter: Send + Sync {
    /// Cut the `[start, end)` window (seconds) out of `source` into `output`.
    async fn cut(&self, source: &Path, start: f64, end: f64, output: &Path)
        -> Result<(), CutError>;
}
