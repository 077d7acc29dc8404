use async_trait::async_trait;

use collabhub_core::result::AppResult;
use collabhub_core::traits::{ProjectDirectory, UserDirectory};
use collabhub_core::types::{ProjectId, UserId};

use super::MemoryDatabase;

#[async_trait]
impl ProjectDirectory for MemoryDatabase {
    async fn exists_by_id(&self, id: ProjectId) -> AppResult<bool> {
        Ok(self.state.lock().await.projects.contains(&id))
    }
}

#[async_trait]
impl UserDirectory for MemoryDatabase {
    async fn exists_by_id(&self, id: UserId) -> AppResult<bool> {
        Ok(self.state.lock().await.users.contains(&id))
    }
}
