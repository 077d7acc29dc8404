//! # collabhub-core
//!
//! Core crate for CollabHub. Contains the unified error system, typed
//! identifiers, configuration schemas, and the traits through which the
//! versioning subsystem reaches its external collaborators (blob storage,
//! project and user directories).
//!
//! This crate has **no** internal dependencies on other CollabHub crates.

pub mod config;
pub mod error;
#[cfg(feature = "axum")]
pub mod http;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
