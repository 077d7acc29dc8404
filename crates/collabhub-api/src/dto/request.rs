//! Request DTOs with validation.

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use collabhub_core::types::{FileId, ProjectId, UserId, VersionId};
use collabhub_entity::UpdateFileMetadata;
use collabhub_service::{CommitVersionRequest, CreateFileRequest};

/// A content type is served back verbatim as a header, so it must be a
/// legal header value.
fn validate_content_type(value: &str) -> Result<(), ValidationError> {
    if HeaderValue::from_str(value).is_err() {
        return Err(ValidationError::new("content_type")
            .with_message("Content type is not a valid header value".into()));
    }
    Ok(())
}

fn validate_batch_content_types(files: &[CreateFileBody]) -> Result<(), ValidationError> {
    files
        .iter()
        .filter_map(|f| f.content_type.as_deref())
        .try_for_each(validate_content_type)
}

/// Create file request body.
///
/// `content` is either a base64 `data:` URL or raw text.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFileBody {
    /// Display name, including extension.
    #[validate(length(min = 1, message = "File name is required"))]
    pub name: String,
    /// MIME type; inferred from the name when omitted.
    #[validate(custom(function = "validate_content_type"))]
    pub content_type: Option<String>,
    /// Initial content.
    #[serde(default)]
    pub content: String,
    /// Owning project.
    pub project_id: ProjectId,
}

impl From<CreateFileBody> for CreateFileRequest {
    fn from(body: CreateFileBody) -> Self {
        Self {
            name: body.name,
            content_type: body.content_type,
            content: body.content,
            project_id: body.project_id,
        }
    }
}

/// Batch create request body. Entries without a name are skipped.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFilesBody {
    /// Files to create, in order.
    #[validate(
        length(min = 1, message = "At least one file is required"),
        custom(function = "validate_batch_content_types")
    )]
    pub files: Vec<CreateFileBody>,
}

/// Metadata update body. Omitted fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateFileBody {
    #[validate(length(min = 1, message = "File name must not be empty"))]
    pub name: Option<String>,
    #[validate(
        length(min = 1, message = "Content type must not be empty"),
        custom(function = "validate_content_type")
    )]
    pub content_type: Option<String>,
    #[validate(length(min = 1, message = "Path must not be empty"))]
    pub path: Option<String>,
}

impl From<UpdateFileBody> for UpdateFileMetadata {
    fn from(body: UpdateFileBody) -> Self {
        Self {
            name: body.name,
            content_type: body.content_type,
            path: body.path,
        }
    }
}

/// Content replacement body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateContentBody {
    /// New live content.
    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: String,
    /// User performing the change.
    pub actor_user_id: Option<UserId>,
}

/// Restore request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RestoreVersionBody {
    /// Version whose snapshot becomes the live content.
    pub version_id: VersionId,
    /// User performing the restore.
    pub actor_user_id: Option<UserId>,
}

/// Commit request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CommitVersionBody {
    /// File the snapshot belongs to.
    pub file_id: FileId,
    /// Free-form label, e.g. "1.0".
    #[validate(length(min = 1, message = "Version label is required"))]
    pub version_label: String,
    /// Commit message.
    #[validate(length(min = 1, message = "Commit message is required"))]
    pub commit_message: String,
    /// Full content snapshot.
    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: String,
}

impl CommitVersionBody {
    /// Splits the body into the target file and the service request.
    pub fn into_parts(self) -> (FileId, CommitVersionRequest) {
        (
            self.file_id,
            CommitVersionRequest {
                version_label: self.version_label,
                commit_message: self.commit_message,
                content: self.content,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_commit_fields_fail_validation() {
        let body = CommitVersionBody {
            file_id: FileId::new(),
            version_label: String::new(),
            commit_message: "msg".to_string(),
            content: String::new(),
        };
        let errors = body.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("version_label"));
        assert!(fields.contains_key("content"));
        assert!(!fields.contains_key("commit_message"));
    }

    #[test]
    fn test_update_body_allows_omitted_fields() {
        let body: UpdateFileBody = serde_json::from_str(r#"{"name": "b.txt"}"#).unwrap();
        assert!(body.validate().is_ok());

        let update = UpdateFileMetadata::from(body);
        assert_eq!(update.name.as_deref(), Some("b.txt"));
        assert!(update.path.is_none());
    }

    #[test]
    fn test_content_type_must_be_a_header_value() {
        let body: CreateFileBody = serde_json::from_value(serde_json::json!({
            "name": "a.txt",
            "content_type": "text/plain\nx",
            "content": "A",
            "project_id": ProjectId::new(),
        }))
        .unwrap();
        assert!(body.validate().unwrap_err().field_errors().contains_key("content_type"));

        let body: UpdateFileBody =
            serde_json::from_str(r#"{"content_type": "text/plain\u0000"}"#).unwrap();
        assert!(body.validate().is_err());

        let body: UpdateFileBody =
            serde_json::from_str(r#"{"content_type": "text/markdown; charset=utf-8"}"#).unwrap();
        assert!(body.validate().is_ok());
    }

    #[test]
    fn test_batch_rejects_bad_content_type_in_any_entry() {
        let entry = |content_type: &str| {
            serde_json::json!({
                "name": "a.txt",
                "content_type": content_type,
                "project_id": ProjectId::new(),
            })
        };
        let body: CreateFilesBody = serde_json::from_value(serde_json::json!({
            "files": [entry("text/plain"), entry("bad\r\nvalue")],
        }))
        .unwrap();
        assert!(body.validate().unwrap_err().field_errors().contains_key("files"));
    }

    #[test]
    fn test_update_body_rejects_empty_name() {
        let body: UpdateFileBody = serde_json::from_str(r#"{"name": ""}"#).unwrap();
        assert!(body.validate().is_err());
    }
}
