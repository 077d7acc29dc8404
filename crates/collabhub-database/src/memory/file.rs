use async_trait::async_trait;

use collabhub_core::error::AppError;
use collabhub_core::result::AppResult;
use collabhub_core::types::{FileId, ProjectId};
use collabhub_entity::{CreateFile, File};

use super::MemoryDatabase;
use crate::traits::FileRepository;

#[async_trait]
impl FileRepository for MemoryDatabase {
    async fn find_by_id(&self, id: FileId) -> AppResult<Option<File>> {
        let state = self.state.lock().await;
        Ok(state.files.iter().find(|f| f.id == id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<File>> {
        Ok(self.state.lock().await.files.clone())
    }

    async fn find_by_project(&self, project_id: ProjectId) -> AppResult<Vec<File>> {
        let state = self.state.lock().await;
        Ok(state
            .files
            .iter()
            .filter(|f| f.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn create(&self, data: &CreateFile) -> AppResult<File> {
        let mut state = self.state.lock().await;
        if !state.projects.contains(&data.project_id) {
            return Err(AppError::not_found(format!(
                "Project {} not found",
                data.project_id
            )));
        }
        if state.file_exists(data.id) {
            return Err(AppError::conflict(format!("File {} already exists", data.id)));
        }

        let file = File {
            id: data.id,
            name: data.name.clone(),
            content_type: data.content_type.clone(),
            path: data.path.clone(),
            project_id: data.project_id,
            uploaded_at: state.stamp(),
        };
        state.files.push(file.clone());
        Ok(file)
    }

    async fn update(&self, file: &File) -> AppResult<File> {
        let mut state = self.state.lock().await;
        let stored = state
            .files
            .iter_mut()
            .find(|f| f.id == file.id)
            .ok_or_else(|| AppError::not_found(format!("File {} not found", file.id)))?;

        stored.name = file.name.clone();
        stored.content_type = file.content_type.clone();
        stored.path = file.path.clone();
        Ok(stored.clone())
    }

    async fn delete_cascade(&self, id: FileId) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        if !state.file_exists(id) {
            return Ok(false);
        }

        state.history.retain(|h| h.file_id != id);
        state.versions.retain(|v| v.file_id != id);
        state.comments.retain(|c| *c != id);
        state.files.retain(|f| f.id != id);
        Ok(true)
    }
}
