//! In-memory object store for tests and ephemeral deployments.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::Mutex;

use crate::traits::{ObjectStore, StorageError, StorageResult};

/// Map-backed store keeping `(content_type, bytes)` per key.
#[derive(Clone, Default)]
pub struct MemoryStore {
    objects: Arc<Mutex<HashMap<String, (String, Bytes)>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects.
    pub async fn object_count(&self) -> usize {
        self.objects.lock().await.len()
    }

    /// Content type recorded for an object, if it exists.
    pub async fn content_type_of(&self, key: &str) -> Option<String> {
        self.objects
            .lock()
            .await
            .get(key)
            .map(|(content_type, _)| content_type.clone())
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn get(&self, key: &str) -> StorageResult<Bytes> {
        self.objects
            .lock()
            .await
            .get(key)
            .map(|(_, data)| data.clone())
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn put(&self, key: &str, content_type: &str, data: Vec<u8>) -> StorageResult<()> {
        self.objects.lock().await.insert(
            key.to_string(),
            (content_type.to_string(), Bytes::from(data)),
        );
        Ok(())
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.objects.lock().await.contains_key(key))
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.objects.lock().await.remove(key);
        Ok(())
    }
}
