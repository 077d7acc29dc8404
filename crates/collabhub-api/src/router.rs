//! Route definitions for the CollabHub HTTP API.
//!
//! All routes are organized by resource and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.storage.max_upload_size_bytes as usize;
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);
    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    let api_routes = Router::new()
        .merge(file_routes())
        .merge(version_routes())
        .merge(history_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(timeout_layer(timeout))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Requests running past `timeout` are answered with 408.
fn timeout_layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}

/// File registry: CRUD, live content, restore
fn file_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/files",
            get(handlers::file::list_files).post(handlers::file::create_file),
        )
        .route("/files/batch", post(handlers::file::create_files))
        .route(
            "/files/project/{project_id}",
            get(handlers::file::list_by_project),
        )
        .route(
            "/files/{id}",
            get(handlers::file::get_file)
                .put(handlers::file::update_file)
                .delete(handlers::file::delete_file),
        )
        .route(
            "/files/{id}/content",
            get(handlers::file::read_content).put(handlers::file::update_content),
        )
        .route("/files/{id}/restore", post(handlers::file::restore_version))
}

/// Version log
fn version_routes() -> Router<AppState> {
    Router::new()
        .route("/versions", post(handlers::version::commit_version))
        .route("/versions/{id}", get(handlers::version::get_version))
        .route(
            "/versions/file/{file_id}",
            get(handlers::version::list_versions),
        )
        .route(
            "/versions/file/{file_id}/ordered",
            get(handlers::version::list_versions_ordered),
        )
}

/// File history
fn history_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/file-history/{id}",
            get(handlers::history::get_entry).delete(handlers::history::delete_entry),
        )
        .route(
            "/file-history/file/{file_id}",
            get(handlers::history::list_by_file),
        )
        .route(
            "/file-history/project/{project_id}",
            get(handlers::history::list_by_project),
        )
        .route(
            "/file-history/user/{user_id}",
            get(handlers::history::list_by_user),
        )
}

/// Liveness
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
