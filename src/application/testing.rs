//! Shared fakes for service tests.

use crate::domain::media::SourceMedia;
use crate::domain::records::{ClipRecord, VideoRecord};
use crate::error::{AcquisitionError, CatalogError, StorageError};
use crate::ports::acquisition::MediaSource;
use crate::ports::catalog::Catalog;
use crate::ports::storage::ObjectStore;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// ObjectStore fake that accepts every upload, records it, and resolves a
/// locator for everything except explicitly denied keys.
#[derive(Clone, Default)]
pub struct RecordingStore {
    uploads: Arc<Mutex<Vec<(String, String)>>>,
    denied: Arc<Mutex<HashSet<String>>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `public_url` return `None` for this key, simulating an upload
    /// the backend never acknowledged.
    pub fn deny_key(&self, key: &str) {
        self.denied.lock().unwrap().insert(key.to_string());
    }

    /// Every (bucket, key) pair uploaded, in call order.
    pub fn uploaded(&self) -> Vec<(String, String)> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for RecordingStore {
    async fn upload(
        &self,
        _local_path: &Path,
        bucket: &str,
        key: &str,
    ) -> Result<String, StorageError> {
        self.uploads
            .lock()
            .unwrap()
            .push((bucket.to_string(), key.to_string()));
        Ok(key.to_string())
    }

    async fn public_url(&self, bucket: &str, key: &str) -> Result<Option<String>, StorageError> {
        if self.denied.lock().unwrap().contains(key) {
            return Ok(None);
        }
        Ok(Some(format!("https://cdn.test/{}/{}", bucket, key)))
    }
}

/// ObjectStore whose calls never complete. For timeout tests.
pub struct HangingStore;

#[async_trait]
impl ObjectStore for HangingStore {
    async fn upload(
        &self,
        _local_path: &Path,
        _bucket: &str,
        _key: &str,
    ) -> Result<String, StorageError> {
        std::future::pending().await
    }

    async fn public_url(&self, _bucket: &str, _key: &str) -> Result<Option<String>, StorageError> {
        std::future::pending().await
    }
}

/// MediaSource whose calls never complete. For timeout tests.
pub struct HangingSource;

#[async_trait]
impl MediaSource for HangingSource {
    async fn acquire(&self, _url: &str) -> Result<SourceMedia, AcquisitionError> {
        std::future::pending().await
    }
}

/// Catalog fake with real upsert/insert semantics: video rows replace by id,
/// clip rows append.
#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    videos: Arc<Mutex<HashMap<usize, VideoRecord>>>,
    clips: Arc<Mutex<Vec<ClipRecord>>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn video_count(&self) -> usize {
        self.videos.lock().unwrap().len()
    }

    pub fn video(&self, id: usize) -> Option<VideoRecord> {
        self.videos.lock().unwrap().get(&id).cloned()
    }

    pub fn clip_count(&self) -> usize {
        self.clips.lock().unwrap().len()
    }

    pub fn clips(&self) -> Vec<ClipRecord> {
        self.clips.lock().unwrap().clone()
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn upsert_video(&self, record: &VideoRecord) -> Result<(), CatalogError> {
        self.videos
            .lock()
            .unwrap()
            .insert(record.id, record.clone());
        Ok(())
    }

    async fn insert_clip(&self, record: &ClipRecord) -> Result<(), CatalogError> {
        self.clips.lock().unwrap().push(record.clone());
        Ok(())
    }
}
