//! # collabhub-api
//!
//! HTTP API layer for CollabHub built on Axum.
//!
//! Provides the REST endpoints for files, versions, and file history,
//! along with middleware (CORS, request logging), extractors, DTOs, and
//! the mapping from [`AppError`](collabhub_core::AppError) to HTTP
//! responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
