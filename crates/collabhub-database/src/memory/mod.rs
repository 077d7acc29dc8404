//! In-process repository backend.
//!
//! One [`MemoryDatabase`] implements every repository trait over a single
//! shared state guarded by a Tokio mutex, so a cascade delete is atomic
//! with respect to every other operation. Rows are kept in insertion
//! order, which doubles as the append sequence.

mod directory;
mod file;
mod history;
mod version;

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use collabhub_core::types::{FileId, ProjectId, UserId};
use collabhub_entity::{File, HistoryEntry, Version};

#[derive(Debug, Default)]
struct MemoryState {
    projects: HashSet<ProjectId>,
    users: HashSet<UserId>,
    files: Vec<File>,
    versions: Vec<Version>,
    history: Vec<HistoryEntry>,
    /// File ids of comments owned by the surrounding system.
    comments: Vec<FileId>,
    /// Last timestamp handed out; keeps stamps strictly increasing.
    last_stamp: Option<DateTime<Utc>>,
}

impl MemoryState {
    fn file_exists(&self, id: FileId) -> bool {
        self.files.iter().any(|f| f.id == id)
    }

    /// Current time, always later than any previously issued stamp.
    fn stamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamp = match self.last_stamp {
            Some(last) if last >= now => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_stamp = Some(stamp);
        stamp
    }
}

/// In-memory implementation of every repository and directory trait.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryDatabase {
    /// Create an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a project so files can be created under it.
    pub async fn insert_project(&self, id: ProjectId) {
        self.state.lock().await.projects.insert(id);
    }

    /// Register a user so it can act on files.
    pub async fn insert_user(&self, id: UserId) {
        self.state.lock().await.users.insert(id);
    }

    /// Attach a comment to a file.
    pub async fn insert_comment(&self, file_id: FileId) {
        self.state.lock().await.comments.push(file_id);
    }

    /// Number of comments currently attached to a file.
    pub async fn comment_count(&self, file_id: FileId) -> usize {
        let state = self.state.lock().await;
        state.comments.iter().filter(|id| **id == file_id).count()
    }
}

/// Newest-first ordering shared by every history projection.
fn newest_first<'a>(entries: impl DoubleEndedIterator<Item = &'a HistoryEntry>) -> Vec<HistoryEntry> {
    let mut out: Vec<HistoryEntry> = entries.rev().cloned().collect();
    out.sort_by(|a, b| b.modified_at.cmp(&a.modified_at));
    out
}
