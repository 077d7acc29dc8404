//! File entity model.

use chrono::{DateTime, Utc};
use collabhub_core::types::{FileId, ProjectId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Prefix marking a path that carries its content inline.
pub const INLINE_PATH_PREFIX: &str = "data:";

/// The current-state record of a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: FileId,
    /// Display name, including extension.
    pub name: String,
    /// MIME type of the content.
    pub content_type: String,
    /// Pointer into the blob store.
    pub path: String,
    /// Owning project.
    pub project_id: ProjectId,
    /// When the file was first uploaded.
    pub uploaded_at: DateTime<Utc>,
}

impl File {
    /// Whether `path` is a legacy inline `data:` URL rather than a blob path.
    pub fn has_inline_path(&self) -> bool {
        self.path.starts_with(INLINE_PATH_PREFIX)
    }

    /// Lowercase extension of the file name, without the dot.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
            .map(|ext| ext.to_lowercase())
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// Caller-assigned ID.
    pub id: FileId,
    /// Display name.
    pub name: String,
    /// MIME type.
    pub content_type: String,
    /// Blob path already written by the caller.
    pub path: String,
    /// Owning project.
    pub project_id: ProjectId,
}

/// Partial metadata update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFileMetadata {
    /// New display name.
    pub name: Option<String>,
    /// New MIME type.
    pub content_type: Option<String>,
    /// New blob path.
    pub path: Option<String>,
}

impl UpdateFileMetadata {
    /// Whether no field is being changed.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.content_type.is_none() && self.path.is_none()
    }

    /// Apply the supplied fields to `file` in place.
    pub fn apply_to(&self, file: &mut File) {
        if let Some(name) = &self.name {
            file.name = name.clone();
        }
        if let Some(content_type) = &self.content_type {
            file.content_type = content_type.clone();
        }
        if let Some(path) = &self.path {
            file.path = path.clone();
        }
    }
}
