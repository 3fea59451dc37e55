use crate::error::StorageError;
use crate::ports::storage::ObjectStore;
use async_trait::async_trait;
use aws_sdk_s3::Client;
use std::path::Path;

/// S3Store implements ObjectStore for any S3-compatible backend.
#[derive(Clone)]
pub struct S3Store {
    client: Client,
    endpoint: String,
}

impl S3Store {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Self { client, endpoint }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn upload(
        &self,
        local_path: &Path,
        bucket: &str,
        key: &str,
    ) -> Result<String, StorageError> {
        let body = tokio::fs::read(local_path).await?;
        let byte_stream = aws_sdk_s3::primitives::ByteStream::from(body);

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(byte_stream)
            .send()
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        // The backend files the object under the key we chose.
        Ok(key.to_string())
    }

    async fn public_url(&self, bucket: &str, key: &str) -> Result<Option<String>, StorageError> {
        match self
            .client
            .head_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(Some(format!("{}/{}/{}", self.endpoint, bucket, key))),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_not_found() {
                    Ok(None)
                } else {
                    Err(StorageError::Backend(service_err.to_string()))
                }
            }
        }
    }
}
