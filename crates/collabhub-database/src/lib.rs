//! # collabhub-database
//!
//! Repository traits for files, versions, and history entries, with a
//! PostgreSQL implementation (sqlx) and an in-process implementation used
//! by tests and `memory://` deployments.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod traits;

use std::sync::Arc;

use collabhub_core::config::DatabaseConfig;
use collabhub_core::result::AppResult;
use collabhub_core::traits::{ProjectDirectory, UserDirectory};
use tracing::info;

pub use connection::DatabasePool;
pub use memory::MemoryDatabase;
pub use traits::{FileRepository, HistoryRepository, VersionRepository};

/// The set of repositories the services are built from.
#[derive(Debug, Clone)]
pub struct Repositories {
    pub files: Arc<dyn FileRepository>,
    pub versions: Arc<dyn VersionRepository>,
    pub history: Arc<dyn HistoryRepository>,
    pub projects: Arc<dyn ProjectDirectory>,
    pub users: Arc<dyn UserDirectory>,
}

impl Repositories {
    /// PostgreSQL-backed repositories sharing one pool.
    pub fn postgres(pool: &DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            files: Arc::new(repositories::PgFileRepository::new(pg.clone())),
            versions: Arc::new(repositories::PgVersionRepository::new(pg.clone())),
            history: Arc::new(repositories::PgHistoryRepository::new(pg.clone())),
            projects: Arc::new(repositories::PgProjectDirectory::new(pg.clone())),
            users: Arc::new(repositories::PgUserDirectory::new(pg)),
        }
    }

    /// In-process repositories sharing one [`MemoryDatabase`].
    pub fn memory(db: &MemoryDatabase) -> Self {
        Self {
            files: Arc::new(db.clone()),
            versions: Arc::new(db.clone()),
            history: Arc::new(db.clone()),
            projects: Arc::new(db.clone()),
            users: Arc::new(db.clone()),
        }
    }

    /// Build repositories for the configured backend.
    ///
    /// For PostgreSQL this connects, optionally migrates, and returns the
    /// pool alongside the repositories so the caller can close it.
    pub async fn connect(
        config: &DatabaseConfig,
    ) -> AppResult<(Self, Option<DatabasePool>)> {
        if config.is_memory() {
            info!("Using in-memory repositories");
            return Ok((Self::memory(&MemoryDatabase::new()), None));
        }

        let pool = DatabasePool::connect(config).await?;
        if config.run_migrations {
            migration::run_migrations(pool.pool()).await?;
        }
        Ok((Self::postgres(&pool), Some(pool)))
    }
}
