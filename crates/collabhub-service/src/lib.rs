//! # collabhub-service
//!
//! Business logic for the versioning subsystem. [`FileService`] owns the
//! live content of each file, [`VersionService`] the committed snapshots,
//! and [`HistoryService`] the audit trail every content change appends to.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time and shared through `Arc`s.

pub mod file;
pub mod history;
pub mod version;

#[cfg(test)]
mod testing;

use collabhub_database::Repositories;
use collabhub_storage::BlobStore;

pub use file::{CreateFileRequest, FileLockGuard, FileLocks, FileService};
pub use history::HistoryService;
pub use version::{CommitVersionRequest, VersionService};

/// All services, wired against one set of repositories and one blob store.
#[derive(Debug, Clone)]
pub struct Services {
    pub files: FileService,
    pub versions: VersionService,
    pub history: HistoryService,
}

impl Services {
    /// Wire the services together.
    pub fn new(repos: &Repositories, blobs: BlobStore) -> Self {
        let history = HistoryService::new(repos.history.clone(), repos.users.clone());
        let files = FileService::new(
            repos.files.clone(),
            repos.projects.clone(),
            history.clone(),
            blobs,
            FileLocks::new(),
        );
        let versions = VersionService::new(repos.versions.clone(), files.clone(), history.clone());
        Self {
            files,
            versions,
            history,
        }
    }
}
