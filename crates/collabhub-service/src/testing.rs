//! Shared fixture for service tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use bytes::Bytes;

use collabhub_core::error::AppError;
use collabhub_core::result::AppResult;
use collabhub_core::traits::StorageProvider;
use collabhub_core::types::{FileId, HistoryId, ProjectId, UserId};
use collabhub_database::{FileRepository, HistoryRepository, MemoryDatabase, Repositories};
use collabhub_entity::{CreateFile, CreateHistoryEntry, File, HistoryEntry};
use collabhub_storage::{BlobStore, MemoryStorageProvider};

use crate::{CreateFileRequest, Services};

/// Memory storage whose writes and deletes can be made to fail.
#[derive(Debug, Clone, Default)]
pub struct FlakyStorage {
    inner: MemoryStorageProvider,
    fail_writes: Arc<AtomicBool>,
    fail_deletes: Arc<AtomicBool>,
}

impl FlakyStorage {
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.is_empty().await
    }
}

#[async_trait]
impl StorageProvider for FlakyStorage {
    fn provider_type(&self) -> &str {
        "flaky"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn read_bytes(&self, path: &str) -> AppResult<Bytes> {
        self.inner.read_bytes(path).await
    }

    async fn write(&self, path: &str, data: Bytes) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::storage(format!("Injected write failure: {path}")));
        }
        self.inner.write(path, data).await
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(AppError::storage(format!("Injected delete failure: {path}")));
        }
        self.inner.delete(path).await
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        self.inner.exists(path).await
    }
}

/// Memory history repository whose appends can be made to fail.
#[derive(Debug, Clone)]
pub struct FlakyHistory {
    inner: MemoryDatabase,
    fail_appends: Arc<AtomicBool>,
}

impl FlakyHistory {
    pub fn new(inner: MemoryDatabase) -> Self {
        Self {
            inner,
            fail_appends: Arc::default(),
        }
    }

    pub fn fail_appends(&self, fail: bool) {
        self.fail_appends.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl HistoryRepository for FlakyHistory {
    async fn find_by_id(&self, id: HistoryId) -> AppResult<Option<HistoryEntry>> {
        HistoryRepository::find_by_id(&self.inner, id).await
    }

    async fn find_by_file(&self, file_id: FileId) -> AppResult<Vec<HistoryEntry>> {
        HistoryRepository::find_by_file(&self.inner, file_id).await
    }

    async fn find_by_project(&self, project_id: ProjectId) -> AppResult<Vec<HistoryEntry>> {
        HistoryRepository::find_by_project(&self.inner, project_id).await
    }

    async fn find_by_user(&self, user_id: UserId) -> AppResult<Vec<HistoryEntry>> {
        HistoryRepository::find_by_user(&self.inner, user_id).await
    }

    async fn create(&self, data: &CreateHistoryEntry) -> AppResult<HistoryEntry> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(AppError::database("Injected history append failure"));
        }
        HistoryRepository::create(&self.inner, data).await
    }

    async fn delete(&self, id: HistoryId) -> AppResult<bool> {
        HistoryRepository::delete(&self.inner, id).await
    }
}

pub struct Fixture {
    pub db: MemoryDatabase,
    pub blobs: FlakyStorage,
    pub history: FlakyHistory,
    pub services: Services,
    pub project: ProjectId,
    pub user: UserId,
}

impl Fixture {
    pub async fn new() -> Self {
        let db = MemoryDatabase::new();
        let project = ProjectId::new();
        let user = UserId::new();
        db.insert_project(project).await;
        db.insert_user(user).await;

        let blobs = FlakyStorage::default();
        let store = BlobStore::new(Arc::new(blobs.clone()), "uploads");
        let history = FlakyHistory::new(db.clone());
        let mut repos = Repositories::memory(&db);
        repos.history = Arc::new(history.clone());
        let services = Services::new(&repos, store);

        Self {
            db,
            blobs,
            history,
            services,
            project,
            user,
        }
    }

    pub async fn create(&self, name: &str, content: &str) -> File {
        self.services
            .files
            .create_file(CreateFileRequest {
                name: name.to_string(),
                content_type: None,
                content: content.to_string(),
                project_id: self.project,
            })
            .await
            .unwrap()
    }

    /// Insert a file whose path is a legacy inline data URL.
    pub async fn insert_inline_file(&self, name: &str, data_url: &str) -> File {
        FileRepository::create(
            &self.db,
            &CreateFile {
                id: FileId::new(),
                name: name.to_string(),
                content_type: "text/plain".to_string(),
                path: data_url.to_string(),
                project_id: self.project,
            },
        )
        .await
        .unwrap()
    }
}
