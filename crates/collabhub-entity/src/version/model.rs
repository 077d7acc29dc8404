//! Version snapshot entity.

use chrono::{DateTime, Utc};
use collabhub_core::types::{FileId, VersionId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An immutable, named snapshot of a file's content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Version {
    /// Unique version identifier.
    pub id: VersionId,
    /// The file this snapshot belongs to.
    pub file_id: FileId,
    /// Free-form label such as `"1.0"`.
    pub version_label: String,
    /// Commit message supplied by the author.
    pub commit_message: String,
    /// Full content at commit time.
    pub content: String,
    /// When the snapshot was committed.
    pub created_at: DateTime<Utc>,
}

/// Data required to append a version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVersion {
    pub file_id: FileId,
    pub version_label: String,
    pub commit_message: String,
    pub content: String,
}
