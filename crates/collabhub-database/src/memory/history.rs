use async_trait::async_trait;

use collabhub_core::error::AppError;
use collabhub_core::result::AppResult;
use collabhub_core::types::{FileId, HistoryId, ProjectId, UserId};
use collabhub_entity::{CreateHistoryEntry, HistoryEntry};

use super::{MemoryDatabase, newest_first};
use crate::traits::HistoryRepository;

#[async_trait]
impl HistoryRepository for MemoryDatabase {
    async fn find_by_id(&self, id: HistoryId) -> AppResult<Option<HistoryEntry>> {
        let state = self.state.lock().await;
        Ok(state.history.iter().find(|h| h.id == id).cloned())
    }

    async fn find_by_file(&self, file_id: FileId) -> AppResult<Vec<HistoryEntry>> {
        let state = self.state.lock().await;
        Ok(newest_first(
            state.history.iter().filter(|h| h.file_id == file_id),
        ))
    }

    async fn find_by_project(&self, project_id: ProjectId) -> AppResult<Vec<HistoryEntry>> {
        let state = self.state.lock().await;
        let files: Vec<FileId> = state
            .files
            .iter()
            .filter(|f| f.project_id == project_id)
            .map(|f| f.id)
            .collect();
        Ok(newest_first(
            state.history.iter().filter(|h| files.contains(&h.file_id)),
        ))
    }

    async fn find_by_user(&self, user_id: UserId) -> AppResult<Vec<HistoryEntry>> {
        let state = self.state.lock().await;
        Ok(newest_first(
            state.history.iter().filter(|h| h.user_id == Some(user_id)),
        ))
    }

    async fn create(&self, data: &CreateHistoryEntry) -> AppResult<HistoryEntry> {
        let mut state = self.state.lock().await;
        if !state.file_exists(data.file_id) {
            return Err(AppError::not_found(format!("File {} not found", data.file_id)));
        }

        let entry = HistoryEntry {
            id: HistoryId::new(),
            file_id: data.file_id,
            user_id: data.user_id,
            content: data.content.clone(),
            path: data.path.clone(),
            change_type: data.change_type,
            description: data.description.clone(),
            version_reference: data.version_reference,
            modified_at: state.stamp(),
        };
        state.history.push(entry.clone());
        Ok(entry)
    }

    async fn delete(&self, id: HistoryId) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        let before = state.history.len();
        state.history.retain(|h| h.id != id);
        Ok(state.history.len() < before)
    }
}
