//! History entry entity model.

use chrono::{DateTime, Utc};
use collabhub_core::types::{FileId, HistoryId, UserId, VersionId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::change_type::ChangeType;

/// An immutable audit record of one content-affecting operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct HistoryEntry {
    /// Unique entry identifier.
    pub id: HistoryId,
    /// The file the change applies to.
    pub file_id: FileId,
    /// Acting user, absent for anonymous or system changes.
    pub user_id: Option<UserId>,
    /// Content snapshot at the time of the change.
    pub content: String,
    /// Blob path at the time of the change.
    pub path: String,
    /// What kind of change this was.
    pub change_type: ChangeType,
    /// Human-readable description.
    pub description: String,
    /// Version the change was derived from (set on restore).
    pub version_reference: Option<VersionId>,
    /// When the change happened.
    pub modified_at: DateTime<Utc>,
}

/// Data required to append a history entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHistoryEntry {
    pub file_id: FileId,
    pub user_id: Option<UserId>,
    pub content: String,
    pub path: String,
    pub change_type: ChangeType,
    pub description: String,
    pub version_reference: Option<VersionId>,
}
