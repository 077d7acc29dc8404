//! Version log handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use collabhub_core::error::AppError;
use collabhub_entity::Version;

use crate::dto::request::CommitVersionBody;
use crate::dto::response::ApiResponse;
use crate::extractors::{ValidatedJson, parse_id};
use crate::state::AppState;

/// POST /api/versions
pub async fn commit_version(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CommitVersionBody>,
) -> Result<impl IntoResponse, AppError> {
    let (file_id, req) = body.into_parts();
    let version = state.services.versions.commit_version(file_id, req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(version))))
}

/// GET /api/versions/{id}
pub async fn get_version(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Version>>, AppError> {
    let version = state.services.versions.get_version(parse_id(&id)?).await?;
    Ok(Json(ApiResponse::ok(version)))
}

/// GET /api/versions/file/{file_id}
pub async fn list_versions(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Version>>>, AppError> {
    let versions = state
        .services
        .versions
        .list_versions(parse_id(&file_id)?)
        .await?;
    Ok(Json(ApiResponse::ok(versions)))
}

/// GET /api/versions/file/{file_id}/ordered
pub async fn list_versions_ordered(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Version>>>, AppError> {
    let versions = state
        .services
        .versions
        .list_versions_ordered(parse_id(&file_id)?)
        .await?;
    Ok(Json(ApiResponse::ok(versions)))
}
