//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use collabhub_core::config::AppConfig;
use collabhub_database::DatabasePool;
use collabhub_service::Services;
use collabhub_storage::BlobStore;

/// Shared state handed to every handler through Axum's `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Loaded configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL pool; `None` when running on the in-memory backend.
    pub db_pool: Option<DatabasePool>,
    /// Blob store holding live file content.
    pub blobs: BlobStore,
    /// File, version, and history services.
    pub services: Services,
    /// Process start time, reported by the health endpoint.
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Creates the state from already-wired components.
    pub fn new(
        config: AppConfig,
        db_pool: Option<DatabasePool>,
        blobs: BlobStore,
        services: Services,
    ) -> Self {
        Self {
            config: Arc::new(config),
            db_pool,
            blobs,
            services,
            started_at: Utc::now(),
        }
    }
}
