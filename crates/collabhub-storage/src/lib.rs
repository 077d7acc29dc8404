//! # collabhub-storage
//!
//! The blob store the versioning subsystem keeps live file content in.
//! [`BlobStore`] adds path allocation and data-URL decoding on top of a
//! pluggable [`StorageProvider`](collabhub_core::traits::StorageProvider).

pub mod blob;
pub mod data_url;
pub mod mime;
pub mod providers;

use std::sync::Arc;

use collabhub_core::config::StorageConfig;
use collabhub_core::error::AppError;
use collabhub_core::result::AppResult;
use collabhub_core::traits::StorageProvider;
use tracing::info;

pub use blob::BlobStore;
pub use providers::{LocalStorageProvider, MemoryStorageProvider};

/// Build the blob store selected by configuration.
pub async fn from_config(config: &StorageConfig) -> AppResult<BlobStore> {
    let provider: Arc<dyn StorageProvider> = match config.provider.as_str() {
        "local" => Arc::new(LocalStorageProvider::new(&config.local.root_path).await?),
        "memory" => Arc::new(MemoryStorageProvider::new()),
        other => {
            return Err(AppError::configuration(format!(
                "Unknown storage provider '{other}'"
            )));
        }
    };

    info!(
        provider = provider.provider_type(),
        upload_prefix = %config.upload_prefix,
        "Blob store initialized"
    );
    Ok(BlobStore::new(provider, config.upload_prefix.clone()))
}
