//! The version log: explicit commits and restores.

use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use collabhub_core::error::AppError;
use collabhub_core::result::AppResult;
use collabhub_core::types::{FileId, UserId, VersionId};
use collabhub_database::VersionRepository;
use collabhub_entity::{ChangeType, CreateVersion, File, Version};

use crate::file::FileService;
use crate::history::HistoryService;

/// Data for committing a version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitVersionRequest {
    /// Free-form label such as `"1.0"`.
    pub version_label: String,
    /// Commit message.
    pub commit_message: String,
    /// Snapshot content.
    pub content: String,
}

/// Commits, lists, and restores version snapshots.
#[derive(Debug, Clone)]
pub struct VersionService {
    version_repo: Arc<dyn VersionRepository>,
    files: FileService,
    history: HistoryService,
}

impl VersionService {
    /// Creates a new version service.
    pub fn new(
        version_repo: Arc<dyn VersionRepository>,
        files: FileService,
        history: HistoryService,
    ) -> Self {
        Self {
            version_repo,
            files,
            history,
        }
    }

    /// Appends a snapshot. The file's live content is not touched.
    pub async fn commit_version(
        &self,
        file_id: FileId,
        req: CommitVersionRequest,
    ) -> AppResult<Version> {
        if req.version_label.trim().is_empty() {
            return Err(AppError::validation("Version label is required"));
        }
        if req.commit_message.trim().is_empty() {
            return Err(AppError::validation("Commit message is required"));
        }
        if req.content.is_empty() {
            return Err(AppError::validation("Content must not be empty"));
        }

        self.files.get_file(file_id).await?;

        let version = self
            .version_repo
            .create(&CreateVersion {
                file_id,
                version_label: req.version_label,
                commit_message: req.commit_message,
                content: req.content,
            })
            .await?;

        info!(
            file_id = %file_id,
            version_id = %version.id,
            label = %version.version_label,
            "Version committed"
        );
        Ok(version)
    }

    /// Gets one version.
    pub async fn get_version(&self, version_id: VersionId) -> AppResult<Version> {
        self.version_repo
            .find_by_id(version_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Version {version_id} not found")))
    }

    /// Versions of a file in commit order. Unknown files yield an empty list.
    pub async fn list_versions(&self, file_id: FileId) -> AppResult<Vec<Version>> {
        self.version_repo.find_by_file(file_id).await
    }

    /// Versions of a file, newest first. Fails with `NotFound` for an
    /// unknown file.
    pub async fn list_versions_ordered(&self, file_id: FileId) -> AppResult<Vec<Version>> {
        self.files.get_file(file_id).await?;
        self.version_repo.find_by_file_newest_first(file_id).await
    }

    /// Makes a version's snapshot the live content of its file.
    ///
    /// Appends a RESTORE entry referencing the version, then overwrites the
    /// blob. Versions committed after the restored one are kept.
    pub async fn restore_version(
        &self,
        file_id: FileId,
        version_id: VersionId,
        actor: Option<UserId>,
    ) -> AppResult<File> {
        let _guard = self.files.locks().acquire(file_id).await;
        let file = self.files.get_file(file_id).await?;

        let version = self.get_version(version_id).await?;
        if version.file_id != file_id {
            return Err(AppError::not_found(format!(
                "Version {version_id} not found for file {file_id}"
            )));
        }

        self.history
            .record_change(
                &file,
                actor,
                &version.content,
                ChangeType::Restore,
                format!("Restored from version {version_id}"),
                Some(version_id),
            )
            .await?;

        let file = self
            .files
            .write_live_content(file, Bytes::from(version.content))
            .await?;

        info!(file_id = %file_id, version_id = %version_id, "Version restored");
        Ok(file)
    }
}
