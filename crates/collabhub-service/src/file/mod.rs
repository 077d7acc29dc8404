//! File registry: current-state records and their live content.

pub mod lock;
pub mod service;

pub use lock::{FileLockGuard, FileLocks};
pub use service::{CreateFileRequest, FileService};
