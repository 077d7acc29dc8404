//! File history handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use collabhub_core::error::AppError;
use collabhub_entity::HistoryEntry;

use crate::dto::response::ApiResponse;
use crate::extractors::parse_id;
use crate::state::AppState;

/// GET /api/file-history/{id}
pub async fn get_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<HistoryEntry>>, AppError> {
    let entry = state.services.history.get_entry(parse_id(&id)?).await?;
    Ok(Json(ApiResponse::ok(entry)))
}

/// DELETE /api/file-history/{id}
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.services.history.delete_entry(parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/file-history/file/{file_id}
pub async fn list_by_file(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<HistoryEntry>>>, AppError> {
    let entries = state
        .services
        .history
        .list_by_file(parse_id(&file_id)?)
        .await?;
    Ok(Json(ApiResponse::ok(entries)))
}

/// GET /api/file-history/project/{project_id}
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<HistoryEntry>>>, AppError> {
    let entries = state
        .services
        .history
        .list_by_project(parse_id(&project_id)?)
        .await?;
    Ok(Json(ApiResponse::ok(entries)))
}

/// GET /api/file-history/user/{user_id}
pub async fn list_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<HistoryEntry>>>, AppError> {
    let entries = state
        .services
        .history
        .list_by_user(parse_id(&user_id)?)
        .await?;
    Ok(Json(ApiResponse::ok(entries)))
}
