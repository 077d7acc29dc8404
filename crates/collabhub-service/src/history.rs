//! The append-only history log.

use std::sync::Arc;

use tracing::{debug, info};

use collabhub_core::error::AppError;
use collabhub_core::result::AppResult;
use collabhub_core::traits::UserDirectory;
use collabhub_core::types::{FileId, HistoryId, ProjectId, UserId, VersionId};
use collabhub_database::HistoryRepository;
use collabhub_entity::{ChangeType, CreateHistoryEntry, File, HistoryEntry};

/// Records and reads back history entries.
#[derive(Debug, Clone)]
pub struct HistoryService {
    history_repo: Arc<dyn HistoryRepository>,
    users: Arc<dyn UserDirectory>,
}

impl HistoryService {
    /// Creates a new history service.
    pub fn new(history_repo: Arc<dyn HistoryRepository>, users: Arc<dyn UserDirectory>) -> Self {
        Self {
            history_repo,
            users,
        }
    }

    /// Fails with `NotFound` when `actor` names a user that does not exist.
    pub async fn ensure_actor(&self, actor: Option<UserId>) -> AppResult<()> {
        if let Some(user_id) = actor {
            if !self.users.exists_by_id(user_id).await? {
                return Err(AppError::not_found(format!("User {user_id} not found")));
            }
        }
        Ok(())
    }

    /// Append one entry for a change to `file`.
    ///
    /// This is the only write path into the log. `file.path` is captured as
    /// the path at the time of the change.
    pub async fn record_change(
        &self,
        file: &File,
        actor: Option<UserId>,
        content: &str,
        change_type: ChangeType,
        description: impl Into<String>,
        version_reference: Option<VersionId>,
    ) -> AppResult<HistoryEntry> {
        self.ensure_actor(actor).await?;

        let entry = self
            .history_repo
            .create(&CreateHistoryEntry {
                file_id: file.id,
                user_id: actor,
                content: content.to_string(),
                path: file.path.clone(),
                change_type,
                description: description.into(),
                version_reference,
            })
            .await?;

        debug!(
            history_id = %entry.id,
            file_id = %file.id,
            change_type = %change_type,
            "History entry recorded"
        );
        Ok(entry)
    }

    /// Get one entry.
    pub async fn get_entry(&self, id: HistoryId) -> AppResult<HistoryEntry> {
        self.history_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("History entry {id} not found")))
    }

    /// Entries for a file, newest first. Unknown files yield an empty list.
    pub async fn list_by_file(&self, file_id: FileId) -> AppResult<Vec<HistoryEntry>> {
        self.history_repo.find_by_file(file_id).await
    }

    /// Entries for all files of a project, newest first.
    pub async fn list_by_project(&self, project_id: ProjectId) -> AppResult<Vec<HistoryEntry>> {
        self.history_repo.find_by_project(project_id).await
    }

    /// Entries made by a user, newest first.
    pub async fn list_by_user(&self, user_id: UserId) -> AppResult<Vec<HistoryEntry>> {
        self.history_repo.find_by_user(user_id).await
    }

    /// Hard-delete an entry. Deleting a missing entry is a no-op.
    pub async fn delete_entry(&self, id: HistoryId) -> AppResult<()> {
        if self.history_repo.delete(id).await? {
            info!(history_id = %id, "History entry deleted");
        }
        Ok(())
    }
}
