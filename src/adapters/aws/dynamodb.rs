use crate::domain::records::{ClipRecord, VideoRecord};
use crate::error::CatalogError;
use crate::ports::catalog::Catalog;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use uuid::Uuid;

/// DynamoCatalog implements Catalog on two DynamoDB tables.
#[derive(Clone)]
pub struct DynamoCatalog {
    client: Client,
    videos_table: String,
    clips_table: String,
}

impl DynamoCatalog {
    pub fn new(client: Client, videos_table: String, clips_table: String) -> Self {
        Self {
            client,
            videos_table,
            clips_table,
        }
    }
}

#[async_trait]
impl Catalog for DynamoCatalog {
    async fn upsert_video(&self, record: &VideoRecord) -> Result<(), CatalogError> {
        // put_item replaces any existing item under the same key, which is
        // exactly the upsert contract for video rows.
        self.client
            .put_item()
            .table_name(&self.videos_table)
            .item("id", AttributeValue::N(record.id.to_string()))
            .item("filename", AttributeValue::S(record.filename.clone()))
            .item(
                "storage_path",
                AttributeValue::S(record.storage_path.clone()),
            )
            .item("url", AttributeValue::S(record.url.clone()))
            .item("title", AttributeValue::S(record.title.clone()))
            .item("description", AttributeValue::S(record.description.clone()))
            .item("channel", AttributeValue::S(record.channel.clone()))
            .item(
                "published_at",
                AttributeValue::S(record.published_at.clone()),
            )
            .send()
            .await
            .map_err(|e| CatalogError::Backend(e.to_string()))?;
        Ok(())
    }

    async fn insert_clip(&self, record: &ClipRecord) -> Result<(), CatalogError> {
        // A fresh row key per call keeps clip writes append-only.
        self.client
            .put_item()
            .table_name(&self.clips_table)
            .item("clip_id", AttributeValue::S(Uuid::new_v4().to_string()))
            .item("video_id", AttributeValue::N(record.video_id.to_string()))
            .item("file_path", AttributeValue::S(record.file_path.clone()))
            .item(
                "original_url",
                AttributeValue::S(record.original_url.clone()),
            )
            .item("transcript", AttributeValue::S(record.transcript.clone()))
            .send()
            .await
            .map_err(|e| CatalogError::Backend(e.to_string()))?;
        Ok(())
    }
}
