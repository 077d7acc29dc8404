//! Core file registry operations.

use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use collabhub_core::error::AppError;
use collabhub_core::result::AppResult;
use collabhub_core::traits::ProjectDirectory;
use collabhub_core::types::{FileId, ProjectId, UserId};
use collabhub_database::FileRepository;
use collabhub_entity::{ChangeType, CreateFile, File, UpdateFileMetadata};
use collabhub_storage::{BlobStore, data_url, mime};

use super::lock::FileLocks;
use crate::history::HistoryService;

/// Data for creating a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFileRequest {
    /// Display name, including extension.
    pub name: String,
    /// MIME type; inferred from the payload or name when absent.
    pub content_type: Option<String>,
    /// Raw text, or a base64 `data:` URL.
    pub content: String,
    /// Owning project.
    pub project_id: ProjectId,
}

/// Manages file records and the live content behind them.
#[derive(Debug, Clone)]
pub struct FileService {
    file_repo: Arc<dyn FileRepository>,
    projects: Arc<dyn ProjectDirectory>,
    history: HistoryService,
    blobs: BlobStore,
    locks: FileLocks,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        file_repo: Arc<dyn FileRepository>,
        projects: Arc<dyn ProjectDirectory>,
        history: HistoryService,
        blobs: BlobStore,
        locks: FileLocks,
    ) -> Self {
        Self {
            file_repo,
            projects,
            history,
            blobs,
            locks,
        }
    }

    /// Per-file write locks shared with the version service.
    pub(crate) fn locks(&self) -> &FileLocks {
        &self.locks
    }

    /// Gets a single file.
    pub async fn get_file(&self, file_id: FileId) -> AppResult<File> {
        self.file_repo
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("File {file_id} not found")))
    }

    /// Lists every file.
    pub async fn list_files(&self) -> AppResult<Vec<File>> {
        self.file_repo.find_all().await
    }

    /// Lists a project's files in upload order. Unknown projects yield an
    /// empty list.
    pub async fn get_files_by_project(&self, project_id: ProjectId) -> AppResult<Vec<File>> {
        self.file_repo.find_by_project(project_id).await
    }

    /// Uploads a new file and records its CREATE entry.
    pub async fn create_file(&self, req: CreateFileRequest) -> AppResult<File> {
        let name = req.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("File name is required"));
        }
        if !self.projects.exists_by_id(req.project_id).await? {
            return Err(AppError::not_found(format!(
                "Project {} not found",
                req.project_id
            )));
        }

        let (path, detected_type) = if data_url::is_data_url(&req.content) {
            self.blobs.put_encoded(&req.content, name).await?
        } else {
            let path = self
                .blobs
                .put(None, name, Bytes::from(req.content.clone()))
                .await?;
            (path, None)
        };

        let content_type = req
            .content_type
            .filter(|t| !t.trim().is_empty())
            .or(detected_type)
            .unwrap_or_else(|| mime::from_name_or_default(name).to_string());

        // The id is fixed up front so the file is locked before it becomes
        // visible; no write can precede its CREATE entry.
        let file_id = FileId::new();
        let _guard = self.locks.acquire(file_id).await;

        let file = match self
            .file_repo
            .create(&CreateFile {
                id: file_id,
                name: name.to_string(),
                content_type,
                path: path.clone(),
                project_id: req.project_id,
            })
            .await
        {
            Ok(file) => file,
            Err(e) => {
                self.blobs.delete_best_effort(&path).await;
                return Err(e);
            }
        };

        if let Err(e) = self
            .history
            .record_change(&file, None, &req.content, ChangeType::Create, "File created", None)
            .await
        {
            warn!(file_id = %file.id, error = %e, "CREATE entry failed, removing file");
            if let Err(cleanup) = self.file_repo.delete_cascade(file.id).await {
                warn!(file_id = %file.id, error = %cleanup, "Failed to remove file");
            }
            self.blobs.delete_best_effort(&path).await;
            return Err(e);
        }

        info!(
            file_id = %file.id,
            project_id = %file.project_id,
            path = %file.path,
            "File created"
        );
        Ok(file)
    }

    /// Creates several files. Entries without a name are skipped; any other
    /// failure stops the batch.
    pub async fn create_files(&self, batch: Vec<CreateFileRequest>) -> AppResult<Vec<File>> {
        let mut created = Vec::with_capacity(batch.len());
        for req in batch {
            if req.name.trim().is_empty() {
                warn!(project_id = %req.project_id, "Skipping batch entry without a name");
                continue;
            }
            created.push(self.create_file(req).await?);
        }
        Ok(created)
    }

    /// Updates name, content type, or path. Records no history.
    pub async fn update_file_metadata(
        &self,
        file_id: FileId,
        update: UpdateFileMetadata,
    ) -> AppResult<File> {
        for (field, value) in [
            ("name", &update.name),
            ("content_type", &update.content_type),
            ("path", &update.path),
        ] {
            if value.as_ref().is_some_and(|v| v.trim().is_empty()) {
                return Err(AppError::validation(format!("File {field} must not be blank")));
            }
        }

        let _guard = self.locks.acquire(file_id).await;
        let mut file = self.get_file(file_id).await?;
        if update.is_empty() {
            return Ok(file);
        }

        update.apply_to(&mut file);
        let file = self.file_repo.update(&file).await?;

        info!(file_id = %file_id, "File metadata updated");
        Ok(file)
    }

    /// Replaces the live content of a file.
    ///
    /// The UPDATE entry is appended before the blob is written; if the
    /// write fails the entry stays and the storage error is returned.
    pub async fn update_file_content(
        &self,
        file_id: FileId,
        content: String,
        actor: Option<UserId>,
    ) -> AppResult<File> {
        if content.is_empty() {
            return Err(AppError::validation("Content must not be empty"));
        }

        let _guard = self.locks.acquire(file_id).await;
        let file = self.get_file(file_id).await?;

        self.history
            .record_change(
                &file,
                actor,
                &content,
                ChangeType::Update,
                "File content updated",
                None,
            )
            .await?;

        let file = self.write_live_content(file, Bytes::from(content)).await?;

        info!(file_id = %file_id, "File content updated");
        Ok(file)
    }

    /// Reads the live content of a file.
    ///
    /// A legacy inline `data:` path is returned verbatim.
    pub async fn read_content(&self, file_id: FileId) -> AppResult<(File, Bytes)> {
        let file = self.get_file(file_id).await?;
        let data = if file.has_inline_path() {
            Bytes::from(file.path.clone())
        } else {
            self.blobs.get(&file.path).await?
        };
        Ok((file, data))
    }

    /// Deletes a file with its versions, history, and comments.
    ///
    /// Blob removal is best-effort; a failure there is logged and the
    /// records are deleted regardless.
    pub async fn delete_file(&self, file_id: FileId) -> AppResult<()> {
        let _guard = self.locks.acquire(file_id).await;
        let file = self.get_file(file_id).await?;

        if !file.has_inline_path() {
            self.blobs.delete_best_effort(&file.path).await;
        }

        if !self.file_repo.delete_cascade(file_id).await? {
            return Err(AppError::not_found(format!("File {file_id} not found")));
        }

        info!(file_id = %file_id, name = %file.name, "File deleted");
        Ok(())
    }

    /// Writes `data` as the live content of `file`. Caller holds the file lock.
    ///
    /// A file still pointing at an inline `data:` URL gets a new blob, and
    /// its path is switched only after that blob is written.
    pub(crate) async fn write_live_content(&self, mut file: File, data: Bytes) -> AppResult<File> {
        if !file.has_inline_path() {
            self.blobs.overwrite(&file.path, data).await?;
            return Ok(file);
        }

        let path = self.blobs.put(None, &file.name, data).await?;
        file.path = path;
        let file = self.file_repo.update(&file).await?;
        info!(file_id = %file.id, path = %file.path, "Inline content moved to blob store");
        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;
    use collabhub_core::error::ErrorKind;

    #[tokio::test]
    async fn test_create_records_single_create_entry() {
        let fx = Fixture::new().await;
        let file = fx.create("f1.txt", "A").await;

        assert_eq!(file.content_type, "text/plain");
        let history = fx.services.history.list_by_file(file.id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].change_type, ChangeType::Create);
        assert_eq!(history[0].content, "A");
        assert_eq!(history[0].path, file.path);
        assert!(history[0].user_id.is_none());
        assert!(fx.services.versions.list_versions(file.id).await.unwrap().is_empty());

        let (_, data) = fx.services.files.read_content(file.id).await.unwrap();
        assert_eq!(data, Bytes::from("A"));
    }

    #[tokio::test]
    async fn test_create_decodes_data_url() {
        let fx = Fixture::new().await;
        let file = fx
            .services
            .files
            .create_file(CreateFileRequest {
                name: "logo.png".to_string(),
                content_type: None,
                content: "data:image/png;base64,iVBORw0KGgo=".to_string(),
                project_id: fx.project,
            })
            .await
            .unwrap();

        assert_eq!(file.content_type, "image/png");
        assert!(file.path.ends_with(".png"));
        let (_, data) = fx.services.files.read_content(file.id).await.unwrap();
        assert_eq!(&data[..4], b"\x89PNG");
    }

    #[tokio::test]
    async fn test_create_validates_before_writing() {
        let fx = Fixture::new().await;

        let err = fx
            .services
            .files
            .create_file(CreateFileRequest {
                name: "  ".to_string(),
                content_type: None,
                content: "A".to_string(),
                project_id: fx.project,
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = fx
            .services
            .files
            .create_file(CreateFileRequest {
                name: "a.txt".to_string(),
                content_type: None,
                content: "A".to_string(),
                project_id: ProjectId::new(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(fx.blobs.is_empty().await);
    }

    #[tokio::test]
    async fn test_update_content_appends_history_and_overwrites_blob() {
        let fx = Fixture::new().await;
        let file = fx.create("f1.txt", "A").await;

        let updated = fx
            .services
            .files
            .update_file_content(file.id, "B".to_string(), Some(fx.user))
            .await
            .unwrap();
        assert_eq!(updated.path, file.path);

        let history = fx.services.history.list_by_file(file.id).await.unwrap();
        let kinds: Vec<_> = history.iter().map(|h| h.change_type).collect();
        assert_eq!(kinds, vec![ChangeType::Update, ChangeType::Create]);
        assert_eq!(history[0].description, "File content updated");
        assert_eq!(history[0].user_id, Some(fx.user));
        assert_eq!(history[0].content, "B");

        let (_, data) = fx.services.files.read_content(file.id).await.unwrap();
        assert_eq!(data, Bytes::from("B"));
    }

    #[tokio::test]
    async fn test_update_content_rejects_bad_input_before_any_write() {
        let fx = Fixture::new().await;
        let file = fx.create("f1.txt", "A").await;

        let err = fx
            .services
            .files
            .update_file_content(file.id, String::new(), None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = fx
            .services
            .files
            .update_file_content(file.id, "B".to_string(), Some(UserId::new()))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let err = fx
            .services
            .files
            .update_file_content(FileId::new(), "B".to_string(), None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        assert_eq!(fx.services.history.list_by_file(file.id).await.unwrap().len(), 1);
        let (_, data) = fx.services.files.read_content(file.id).await.unwrap();
        assert_eq!(data, Bytes::from("A"));
    }

    #[tokio::test]
    async fn test_failed_blob_write_keeps_history_entry() {
        let fx = Fixture::new().await;
        let file = fx.create("f1.txt", "A").await;

        fx.blobs.fail_writes(true);
        let err = fx
            .services
            .files
            .update_file_content(file.id, "B".to_string(), None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Storage);

        let history = fx.services.history.list_by_file(file.id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].change_type, ChangeType::Update);

        fx.blobs.fail_writes(false);
        let (_, data) = fx.services.files.read_content(file.id).await.unwrap();
        assert_eq!(data, Bytes::from("A"));
    }

    #[tokio::test]
    async fn test_inline_path_is_materialized_on_update() {
        let fx = Fixture::new().await;
        let inline = "data:text/plain;base64,QQ==";
        let file = fx.insert_inline_file("legacy.txt", inline).await;

        let (_, data) = fx.services.files.read_content(file.id).await.unwrap();
        assert_eq!(data, Bytes::from(inline));

        let updated = fx
            .services
            .files
            .update_file_content(file.id, "B".to_string(), None)
            .await
            .unwrap();
        assert!(!updated.has_inline_path());
        assert!(updated.path.ends_with(".txt"));

        let history = fx.services.history.list_by_file(file.id).await.unwrap();
        assert_eq!(history[0].path, inline);

        let (_, data) = fx.services.files.read_content(file.id).await.unwrap();
        assert_eq!(data, Bytes::from("B"));
    }

    #[tokio::test]
    async fn test_update_metadata_touches_only_supplied_fields() {
        let fx = Fixture::new().await;
        let file = fx.create("f1.txt", "A").await;

        let updated = fx
            .services
            .files
            .update_file_metadata(
                file.id,
                UpdateFileMetadata {
                    name: Some("renamed.md".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "renamed.md");
        assert_eq!(updated.path, file.path);
        assert_eq!(updated.content_type, file.content_type);
        assert_eq!(fx.services.history.list_by_file(file.id).await.unwrap().len(), 1);

        let err = fx
            .services
            .files
            .update_file_metadata(
                file.id,
                UpdateFileMetadata {
                    path: Some(" ".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_delete_removes_everything_and_tolerates_blob_failure() {
        let fx = Fixture::new().await;
        let file = fx.create("f1.txt", "A").await;
        fx.services
            .versions
            .commit_version(
                file.id,
                crate::CommitVersionRequest {
                    version_label: "1.0".to_string(),
                    commit_message: "first cut".to_string(),
                    content: "A".to_string(),
                },
            )
            .await
            .unwrap();
        fx.db.insert_comment(file.id).await;

        fx.blobs.fail_deletes(true);
        fx.services.files.delete_file(file.id).await.unwrap();

        assert!(fx.services.files.get_files_by_project(fx.project).await.unwrap().is_empty());
        assert!(fx.services.history.list_by_file(file.id).await.unwrap().is_empty());
        assert!(fx.services.versions.list_versions(file.id).await.unwrap().is_empty());
        assert_eq!(fx.db.comment_count(file.id).await, 0);

        let err = fx.services.files.delete_file(file.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_batch_create_skips_unnamed_entries() {
        let fx = Fixture::new().await;
        let req = |name: &str| CreateFileRequest {
            name: name.to_string(),
            content_type: None,
            content: "x".to_string(),
            project_id: fx.project,
        };

        let created = fx
            .services
            .files
            .create_files(vec![req("a.txt"), req(""), req("b.txt")])
            .await
            .unwrap();
        let names: Vec<_> = created.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);

        let listed = fx.services.files.get_files_by_project(fx.project).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(fx.services.files.get_files_by_project(ProjectId::new()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_create_entry_removes_file_and_blob() {
        let fx = Fixture::new().await;

        fx.history.fail_appends(true);
        let err = fx
            .services
            .files
            .create_file(CreateFileRequest {
                name: "f1.txt".to_string(),
                content_type: None,
                content: "A".to_string(),
                project_id: fx.project,
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Database);

        assert!(fx.services.files.get_files_by_project(fx.project).await.unwrap().is_empty());
        assert!(fx.blobs.is_empty().await);
        assert!(fx.services.files.locks().is_empty());

        fx.history.fail_appends(false);
        let file = fx.create("f1.txt", "A").await;
        let history = fx.services.history.list_by_file(file.id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].change_type, ChangeType::Create);
    }

    #[tokio::test]
    async fn test_lock_registry_drains_after_every_outcome() {
        let fx = Fixture::new().await;
        let locks = fx.services.files.locks();

        for _ in 0..50 {
            let missing = FileId::new();
            assert!(
                fx.services
                    .files
                    .update_file_content(missing, "B".to_string(), None)
                    .await
                    .unwrap_err()
                    .is_not_found()
            );
            assert!(
                fx.services
                    .files
                    .update_file_metadata(missing, UpdateFileMetadata::default())
                    .await
                    .unwrap_err()
                    .is_not_found()
            );
            assert!(fx.services.files.delete_file(missing).await.unwrap_err().is_not_found());
            assert!(
                fx.services
                    .versions
                    .restore_version(missing, collabhub_core::types::VersionId::new(), None)
                    .await
                    .unwrap_err()
                    .is_not_found()
            );
        }
        assert!(locks.is_empty());

        let file = fx.create("f1.txt", "A").await;
        fx.services
            .files
            .update_file_content(file.id, "B".to_string(), None)
            .await
            .unwrap();
        assert!(locks.is_empty());

        fx.services.files.delete_file(file.id).await.unwrap();
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_updates_apply_in_arrival_order() {
        let fx = Fixture::new().await;
        let file = fx.create("f1.txt", "A").await;

        // Queue every writer behind a held lock so arrival order is fixed.
        let held = fx.services.files.locks().acquire(file.id).await;
        let mut tasks = Vec::new();
        for i in 0..8 {
            let files = fx.services.files.clone();
            tasks.push(tokio::spawn(async move {
                files
                    .update_file_content(file.id, format!("rev-{i}"), None)
                    .await
                    .unwrap();
            }));
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        assert!(tasks.iter().all(|t| !t.is_finished()));
        drop(held);

        for task in tasks {
            task.await.unwrap();
        }

        let history = fx.services.history.list_by_file(file.id).await.unwrap();
        let contents: Vec<_> = history.iter().map(|h| h.content.as_str()).collect();
        assert_eq!(
            contents,
            vec!["rev-7", "rev-6", "rev-5", "rev-4", "rev-3", "rev-2", "rev-1", "rev-0", "A"]
        );
        let (_, data) = fx.services.files.read_content(file.id).await.unwrap();
        assert_eq!(data, Bytes::from("rev-7"));
        assert!(fx.services.files.locks().is_empty());
    }
}
