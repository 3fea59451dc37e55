use crate::error::StorageError;
use async_trait::async_trait;
use std::path::Path;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload a local file into `bucket` under `key`.
    /// Returns the storage path the backend filed it under.
    async fn upload(&self, local_path: &Path, bucket: &str, key: &str)
        -> Result<String, StorageError>;

    /// Resolve a public locator for an object, or `None` if the backend
    /// does not know the key. Existence check only, not an integrity check.
    async fn public_url(&self, bucket: &str, key: &str) -> Result<Option<String>, StorageError>;
}
