//! Repository traits the service layer depends on.
//!
//! Every method returns fully materialised rows; nothing is loaded lazily.

use async_trait::async_trait;

use collabhub_core::result::AppResult;
use collabhub_core::types::{FileId, HistoryId, ProjectId, UserId, VersionId};
use collabhub_entity::{
    CreateFile, CreateHistoryEntry, CreateVersion, File, HistoryEntry, Version,
};

/// Persistence for the current-state file records.
#[async_trait]
pub trait FileRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Find a file by ID.
    async fn find_by_id(&self, id: FileId) -> AppResult<Option<File>>;

    /// All files, in insertion order.
    async fn find_all(&self) -> AppResult<Vec<File>>;

    /// Files owned by a project, in insertion order.
    async fn find_by_project(&self, project_id: ProjectId) -> AppResult<Vec<File>>;

    /// Insert a file record.
    async fn create(&self, data: &CreateFile) -> AppResult<File>;

    /// Persist name, content type, and path of an existing file.
    ///
    /// Returns `NotFound` if the row no longer exists.
    async fn update(&self, file: &File) -> AppResult<File>;

    /// Atomically delete a file together with its history entries,
    /// versions, and comments. Returns `false` if the file did not exist.
    async fn delete_cascade(&self, id: FileId) -> AppResult<bool>;
}

/// Persistence for the append-only version log.
#[async_trait]
pub trait VersionRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Find a version by ID.
    async fn find_by_id(&self, id: VersionId) -> AppResult<Option<Version>>;

    /// Versions of a file in commit order.
    async fn find_by_file(&self, file_id: FileId) -> AppResult<Vec<Version>>;

    /// Versions of a file, newest first.
    async fn find_by_file_newest_first(&self, file_id: FileId) -> AppResult<Vec<Version>>;

    /// Append a version stamped with the current time.
    async fn create(&self, data: &CreateVersion) -> AppResult<Version>;
}

/// Persistence for the append-only history log.
///
/// All list methods return entries newest first; entries sharing a
/// timestamp come back in reverse append order.
#[async_trait]
pub trait HistoryRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Find an entry by ID.
    async fn find_by_id(&self, id: HistoryId) -> AppResult<Option<HistoryEntry>>;

    /// Entries for one file.
    async fn find_by_file(&self, file_id: FileId) -> AppResult<Vec<HistoryEntry>>;

    /// Entries for every file currently owned by a project.
    async fn find_by_project(&self, project_id: ProjectId) -> AppResult<Vec<HistoryEntry>>;

    /// Entries made by one user.
    async fn find_by_user(&self, user_id: UserId) -> AppResult<Vec<HistoryEntry>>;

    /// Append an entry stamped with the current time.
    async fn create(&self, data: &CreateHistoryEntry) -> AppResult<HistoryEntry>;

    /// Delete an entry. Returns `false` if it did not exist.
    async fn delete(&self, id: HistoryId) -> AppResult<bool>;
}
