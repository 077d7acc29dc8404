use async_trait::async_trait;

use collabhub_core::error::AppError;
use collabhub_core::result::AppResult;
use collabhub_core::types::{FileId, VersionId};
use collabhub_entity::{CreateVersion, Version};

use super::MemoryDatabase;
use crate::traits::VersionRepository;

#[async_trait]
impl VersionRepository for MemoryDatabase {
    async fn find_by_id(&self, id: VersionId) -> AppResult<Option<Version>> {
        let state = self.state.lock().await;
        Ok(state.versions.iter().find(|v| v.id == id).cloned())
    }

    async fn find_by_file(&self, file_id: FileId) -> AppResult<Vec<Version>> {
        let state = self.state.lock().await;
        Ok(state
            .versions
            .iter()
            .filter(|v| v.file_id == file_id)
            .cloned()
            .collect())
    }

    async fn find_by_file_newest_first(&self, file_id: FileId) -> AppResult<Vec<Version>> {
        let state = self.state.lock().await;
        let mut out: Vec<Version> = state
            .versions
            .iter()
            .rev()
            .filter(|v| v.file_id == file_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }

    async fn create(&self, data: &CreateVersion) -> AppResult<Version> {
        let mut state = self.state.lock().await;
        if !state.file_exists(data.file_id) {
            return Err(AppError::not_found(format!("File {} not found", data.file_id)));
        }

        let version = Version {
            id: VersionId::new(),
            file_id: data.file_id,
            version_label: data.version_label.clone(),
            commit_message: data.commit_message.clone(),
            content: data.content.clone(),
            created_at: state.stamp(),
        };
        state.versions.push(version.clone());
        Ok(version)
    }
}
