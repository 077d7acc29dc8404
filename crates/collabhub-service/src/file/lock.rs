//! Per-file serialization of content writes.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use collabhub_core::types::FileId;

type LockMap = DashMap<FileId, Arc<Mutex<()>>>;

/// A registry of async mutexes keyed by file id.
///
/// Holding the guard returned by [`FileLocks::acquire`] excludes every
/// other content write to the same file; different files never contend.
/// An entry lives only while some caller holds or waits for it.
#[derive(Debug, Clone, Default)]
pub struct FileLocks {
    locks: Arc<LockMap>,
}

impl FileLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive write access to `file_id`.
    pub async fn acquire(&self, file_id: FileId) -> FileLockGuard {
        let lock = self.locks.entry(file_id).or_default().clone();
        let guard = lock.lock_owned().await;
        FileLockGuard {
            file_id,
            guard: Some(guard),
            locks: Arc::clone(&self.locks),
        }
    }

    /// Number of files with a registered mutex.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

/// Exclusive access to one file. Dropping it releases the mutex and
/// removes the registry entry when nobody else is queued on it.
#[derive(Debug)]
pub struct FileLockGuard {
    file_id: FileId,
    guard: Option<OwnedMutexGuard<()>>,
    locks: Arc<LockMap>,
}

impl Drop for FileLockGuard {
    fn drop(&mut self) {
        // Release our handle on the mutex first so only the map's remains.
        self.guard.take();
        self.locks
            .remove_if(&self.file_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}
