//! # collabhub-entity
//!
//! Row models for the versioning subsystem. Every struct here maps one
//! database table row (deriving `sqlx::FromRow`) or the payload used to
//! insert one. There is exactly one shape per entity; services and API
//! handlers pass these values around directly.

pub mod file;
pub mod history;
pub mod version;

pub use file::{CreateFile, File, UpdateFileMetadata};
pub use history::{ChangeType, CreateHistoryEntry, HistoryEntry};
pub use version::{CreateVersion, Version};
