//! Lookups into entities owned by the surrounding system.
//!
//! Projects and users are created and managed elsewhere; the versioning
//! subsystem only needs to know whether an id refers to a live record.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::{ProjectId, UserId};

/// Read-only view of the project table.
#[async_trait]
pub trait ProjectDirectory: Send + Sync + std::fmt::Debug + 'static {
    /// Whether a project with this id exists.
    async fn exists_by_id(&self, id: ProjectId) -> AppResult<bool>;
}

/// Read-only view of the user table.
#[async_trait]
pub trait UserDirectory: Send + Sync + std::fmt::Debug + 'static {
    /// Whether a user with this id exists.
    async fn exists_by_id(&self, id: UserId) -> AppResult<bool>;
}
