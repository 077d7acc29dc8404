//! Kinds of content-affecting operations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The operation a history entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "file_change_type", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeType {
    /// The file was first uploaded.
    Create,
    /// The live content was overwritten.
    Update,
    /// The live content was replaced by a version snapshot.
    Restore,
    /// The file was removed.
    Delete,
}

impl ChangeType {
    /// Return the change type as an uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Restore => "RESTORE",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_uses_uppercase() {
        let json = serde_json::to_string(&ChangeType::Restore).expect("serialize");
        assert_eq!(json, "\"RESTORE\"");
        let parsed: ChangeType = serde_json::from_str("\"UPDATE\"").expect("deserialize");
        assert_eq!(parsed, ChangeType::Update);
    }

    #[test]
    fn test_display_matches_as_str() {
        assert_eq!(ChangeType::Create.to_string(), "CREATE");
        assert_eq!(ChangeType::Delete.to_string(), ChangeType::Delete.as_str());
    }
}
