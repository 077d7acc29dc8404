//! Existence checks against the project and user tables.

use async_trait::async_trait;
use sqlx::PgPool;

use collabhub_core::error::{AppError, ErrorKind};
use collabhub_core::result::AppResult;
use collabhub_core::traits::{ProjectDirectory, UserDirectory};
use collabhub_core::types::{ProjectId, UserId};

/// [`ProjectDirectory`] over the `projects` table.
#[derive(Debug, Clone)]
pub struct PgProjectDirectory {
    pool: PgPool,
}

impl PgProjectDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectDirectory for PgProjectDirectory {
    async fn exists_by_id(&self, id: ProjectId) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM projects WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to look up project", e))
    }
}

/// [`UserDirectory`] over the `users` table.
#[derive(Debug, Clone)]
pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn exists_by_id(&self, id: UserId) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to look up user", e))
    }
}
