//! Blob storage configuration.

use serde::{Deserialize, Serialize};

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Provider backing the blob store: `"local"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Directory prefix under which new blobs are allocated.
    #[serde(default = "default_upload_prefix")]
    pub upload_prefix: String,
    /// Maximum accepted request body in bytes (default 50 MB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Local filesystem provider configuration.
    #[serde(default)]
    pub local: LocalStorageConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            upload_prefix: default_upload_prefix(),
            max_upload_size_bytes: default_max_upload(),
            local: LocalStorageConfig::default(),
        }
    }
}

/// Local filesystem storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalStorageConfig {
    /// Root path for local blob storage.
    #[serde(default = "default_local_root")]
    pub root_path: String,
}

impl Default for LocalStorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_local_root(),
        }
    }
}

fn default_provider() -> String {
    "local".to_string()
}

fn default_upload_prefix() -> String {
    "uploads".to_string()
}

fn default_max_upload() -> u64 {
    52_428_800 // 50 MB
}

fn default_local_root() -> String {
    "./data/storage".to_string()
}
