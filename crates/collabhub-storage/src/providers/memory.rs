//! In-memory storage provider.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use collabhub_core::error::AppError;
use collabhub_core::result::AppResult;
use collabhub_core::traits::StorageProvider;

/// Keeps blobs in a process-local map. Contents are lost on restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorageProvider {
    blobs: Arc<RwLock<HashMap<String, Bytes>>>,
}

impl MemoryStorageProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(path: &str) -> String {
        path.trim_start_matches('/').to_string()
    }

    /// Number of stored blobs.
    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }

    /// Whether no blob is stored.
    pub async fn is_empty(&self) -> bool {
        self.blobs.read().await.is_empty()
    }
}

#[async_trait]
impl StorageProvider for MemoryStorageProvider {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn read_bytes(&self, path: &str) -> AppResult<Bytes> {
        self.blobs
            .read()
            .await
            .get(&Self::key(path))
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Blob not found: {path}")))
    }

    async fn write(&self, path: &str, data: Bytes) -> AppResult<()> {
        self.blobs.write().await.insert(Self::key(path), data);
        Ok(())
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        self.blobs.write().await.remove(&Self::key(path));
        Ok(())
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        Ok(self.blobs.read().await.contains_key(&Self::key(path)))
    }
}
