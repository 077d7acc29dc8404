//! Convenience result type alias for CollabHub.

use crate::error::AppError;

/// A specialized `Result` type for CollabHub operations.
pub type AppResult<T> = Result<T, AppError>;
