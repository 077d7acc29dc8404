//! File repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use collabhub_core::error::{AppError, ErrorKind};
use collabhub_core::result::AppResult;
use collabhub_core::types::{FileId, ProjectId};
use collabhub_entity::file::{CreateFile, File};

use crate::traits::FileRepository;

/// PostgreSQL-backed [`FileRepository`].
#[derive(Debug, Clone)]
pub struct PgFileRepository {
    pool: PgPool,
}

impl PgFileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileRepository for PgFileRepository {
    async fn find_by_id(&self, id: FileId) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    async fn find_all(&self) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files ORDER BY seq ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    async fn find_by_project(&self, project_id: ProjectId) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE project_id = $1 ORDER BY seq ASC")
            .bind(project_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list project files", e)
            })
    }

    async fn create(&self, data: &CreateFile) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "INSERT INTO files (id, name, content_type, path, project_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(data.id)
        .bind(&data.name)
        .bind(&data.content_type)
        .bind(&data.path)
        .bind(data.project_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::not_found(format!("Project {} not found", data.project_id))
            }
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::conflict(format!("File {} already exists", data.id))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create file", e),
        })
    }

    async fn update(&self, file: &File) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "UPDATE files SET name = $2, content_type = $3, path = $4 WHERE id = $1 RETURNING *",
        )
        .bind(file.id)
        .bind(&file.name)
        .bind(&file.content_type)
        .bind(&file.path)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update file", e))?
        .ok_or_else(|| AppError::not_found(format!("File {} not found", file.id)))
    }

    async fn delete_cascade(&self, id: FileId) -> AppResult<bool> {
        let db_err = |msg: &'static str| {
            move |e: sqlx::Error| AppError::with_source(ErrorKind::Database, msg, e)
        };

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_err("Failed to begin file delete"))?;

        let history = sqlx::query("DELETE FROM file_history WHERE file_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_err("Failed to delete file history"))?;

        let versions = sqlx::query("DELETE FROM file_versions WHERE file_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_err("Failed to delete file versions"))?;

        sqlx::query("DELETE FROM comments WHERE file_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_err("Failed to delete file comments"))?;

        let file = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_err("Failed to delete file"))?;

        tx.commit()
            .await
            .map_err(db_err("Failed to commit file delete"))?;

        debug!(
            file_id = %id,
            history = history.rows_affected(),
            versions = versions.rows_affected(),
            "File rows deleted"
        );
        Ok(file.rows_affected() > 0)
    }
}
