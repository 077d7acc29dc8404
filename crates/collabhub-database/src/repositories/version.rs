//! Version repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use collabhub_core::error::{AppError, ErrorKind};
use collabhub_core::result::AppResult;
use collabhub_core::types::{FileId, VersionId};
use collabhub_entity::version::{CreateVersion, Version};

use crate::traits::VersionRepository;

/// PostgreSQL-backed [`VersionRepository`].
#[derive(Debug, Clone)]
pub struct PgVersionRepository {
    pool: PgPool,
}

impl PgVersionRepository {
    /// Create a new version repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VersionRepository for PgVersionRepository {
    async fn find_by_id(&self, id: VersionId) -> AppResult<Option<Version>> {
        sqlx::query_as::<_, Version>("SELECT * FROM file_versions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find version", e))
    }

    async fn find_by_file(&self, file_id: FileId) -> AppResult<Vec<Version>> {
        sqlx::query_as::<_, Version>(
            "SELECT * FROM file_versions WHERE file_id = $1 ORDER BY seq ASC",
        )
        .bind(file_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list versions", e))
    }

    async fn find_by_file_newest_first(&self, file_id: FileId) -> AppResult<Vec<Version>> {
        sqlx::query_as::<_, Version>(
            "SELECT * FROM file_versions WHERE file_id = $1 ORDER BY created_at DESC, seq DESC",
        )
        .bind(file_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list versions", e))
    }

    async fn create(&self, data: &CreateVersion) -> AppResult<Version> {
        sqlx::query_as::<_, Version>(
            "INSERT INTO file_versions (file_id, version_label, commit_message, content, created_at) \
             VALUES ($1, $2, $3, $4, clock_timestamp()) RETURNING *",
        )
        .bind(data.file_id)
        .bind(&data.version_label)
        .bind(&data.commit_message)
        .bind(&data.content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::not_found(format!("File {} not found", data.file_id))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create version", e),
        })
    }
}
