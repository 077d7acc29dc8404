//! The blob store adapter used by the file services.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, warn};
use uuid::Uuid;

use collabhub_core::error::AppError;
use collabhub_core::result::AppResult;
use collabhub_core::traits::StorageProvider;

use crate::data_url;

/// Path-addressed blob storage over a [`StorageProvider`].
///
/// New blobs are allocated under `upload_prefix` with a random name that
/// keeps the suggested file name's extension.
#[derive(Clone)]
pub struct BlobStore {
    provider: Arc<dyn StorageProvider>,
    upload_prefix: String,
}

impl fmt::Debug for BlobStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlobStore")
            .field("provider", &self.provider.provider_type())
            .field("upload_prefix", &self.upload_prefix)
            .finish()
    }
}

impl BlobStore {
    /// Create a blob store allocating new paths under `upload_prefix`.
    pub fn new(provider: Arc<dyn StorageProvider>, upload_prefix: impl Into<String>) -> Self {
        Self {
            provider,
            upload_prefix: upload_prefix.into().trim_matches('/').to_string(),
        }
    }

    /// Name of the underlying provider.
    pub fn provider_type(&self) -> &str {
        self.provider.provider_type()
    }

    /// Whether the underlying provider is reachable.
    pub async fn health_check(&self) -> AppResult<bool> {
        self.provider.health_check().await
    }

    /// Allocate a fresh path for a blob named like `suggested_name`.
    pub fn allocate_path(&self, suggested_name: &str) -> String {
        let ext = suggested_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
            .unwrap_or_default();
        let name = format!("{}{ext}", Uuid::new_v4());
        if self.upload_prefix.is_empty() {
            name
        } else {
            format!("{}/{name}", self.upload_prefix)
        }
    }

    /// Store raw bytes, at `path` if given or at a freshly allocated path.
    /// Returns the path written.
    pub async fn put(&self, path: Option<&str>, suggested_name: &str, data: Bytes) -> AppResult<String> {
        let path = match path {
            Some(p) => {
                validate_path(p)?;
                p.to_string()
            }
            None => self.allocate_path(suggested_name),
        };
        self.provider.write(&path, data).await?;
        debug!(path = %path, "Stored blob");
        Ok(path)
    }

    /// Decode a base64 data-URL payload and store it at a fresh path.
    ///
    /// Returns the path and the media type the payload declared, if any.
    pub async fn put_encoded(
        &self,
        payload: &str,
        suggested_name: &str,
    ) -> AppResult<(String, Option<String>)> {
        let decoded = data_url::decode(payload)?;
        let path = self
            .put(None, suggested_name, Bytes::from(decoded.data))
            .await?;
        Ok((path, decoded.media_type))
    }

    /// Read the bytes stored at `path`.
    pub async fn get(&self, path: &str) -> AppResult<Bytes> {
        validate_path(path)?;
        self.provider.read_bytes(path).await
    }

    /// Replace the bytes stored at `path`.
    pub async fn overwrite(&self, path: &str, data: Bytes) -> AppResult<()> {
        validate_path(path)?;
        self.provider.write(path, data).await?;
        debug!(path, "Overwrote blob");
        Ok(())
    }

    /// Delete the blob at `path`. Missing blobs are not an error.
    pub async fn delete(&self, path: &str) -> AppResult<()> {
        validate_path(path)?;
        self.provider.delete(path).await
    }

    /// Delete the blob at `path`, logging instead of returning failures.
    pub async fn delete_best_effort(&self, path: &str) {
        if let Err(e) = self.delete(path).await {
            warn!(path, error = %e, "Failed to delete blob");
        }
    }
}

/// Reject paths that are empty or step outside the provider root.
fn validate_path(path: &str) -> AppResult<()> {
    if path.trim().is_empty() {
        return Err(AppError::validation("Blob path must not be empty"));
    }
    if path.split(['/', '\\']).any(|segment| segment == "..") {
        return Err(AppError::validation(format!(
            "Blob path must not contain '..': {path}"
        )));
    }
    Ok(())
}
