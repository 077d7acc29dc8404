//! History log repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use collabhub_core::error::{AppError, ErrorKind};
use collabhub_core::result::AppResult;
use collabhub_core::types::{FileId, HistoryId, ProjectId, UserId};
use collabhub_entity::history::{CreateHistoryEntry, HistoryEntry};

use crate::traits::HistoryRepository;

/// PostgreSQL-backed [`HistoryRepository`].
#[derive(Debug, Clone)]
pub struct PgHistoryRepository {
    pool: PgPool,
}

impl PgHistoryRepository {
    /// Create a new history repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoryRepository for PgHistoryRepository {
    async fn find_by_id(&self, id: HistoryId) -> AppResult<Option<HistoryEntry>> {
        sqlx::query_as::<_, HistoryEntry>("SELECT * FROM file_history WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find history entry", e)
            })
    }

    async fn find_by_file(&self, file_id: FileId) -> AppResult<Vec<HistoryEntry>> {
        sqlx::query_as::<_, HistoryEntry>(
            "SELECT * FROM file_history WHERE file_id = $1 ORDER BY modified_at DESC, seq DESC",
        )
        .bind(file_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list file history", e))
    }

    async fn find_by_project(&self, project_id: ProjectId) -> AppResult<Vec<HistoryEntry>> {
        sqlx::query_as::<_, HistoryEntry>(
            "SELECT h.* FROM file_history h JOIN files f ON f.id = h.file_id \
             WHERE f.project_id = $1 ORDER BY h.modified_at DESC, h.seq DESC",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list project history", e)
        })
    }

    async fn find_by_user(&self, user_id: UserId) -> AppResult<Vec<HistoryEntry>> {
        sqlx::query_as::<_, HistoryEntry>(
            "SELECT * FROM file_history WHERE user_id = $1 ORDER BY modified_at DESC, seq DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list user history", e))
    }

    async fn create(&self, data: &CreateHistoryEntry) -> AppResult<HistoryEntry> {
        sqlx::query_as::<_, HistoryEntry>(
            "INSERT INTO file_history \
             (file_id, user_id, content, path, change_type, description, version_reference, modified_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, clock_timestamp()) RETURNING *",
        )
        .bind(data.file_id)
        .bind(data.user_id)
        .bind(&data.content)
        .bind(&data.path)
        .bind(data.change_type)
        .bind(&data.description)
        .bind(data.version_reference)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create history entry", e)
        })
    }

    async fn delete(&self, id: HistoryId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM file_history WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete history entry", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
