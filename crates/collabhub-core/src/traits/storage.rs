//! Storage provider trait for pluggable blob backends.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Byte-addressed storage keyed by a relative logical path.
///
/// Implementations live in `collabhub-storage`. Paths are `/`-separated and
/// never escape the provider's root.
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "memory").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Read an object into memory.
    ///
    /// Returns a `NotFound` error when nothing is stored at `path`.
    async fn read_bytes(&self, path: &str) -> AppResult<Bytes>;

    /// Create or replace the object at `path`.
    async fn write(&self, path: &str, data: Bytes) -> AppResult<()>;

    /// Delete the object at `path`. Deleting a missing object succeeds.
    async fn delete(&self, path: &str) -> AppResult<()>;

    /// Check whether an object exists at `path`.
    async fn exists(&self, path: &str) -> AppResult<bool>;
}
