//! File registry handlers: CRUD, live content, and restore.

use axum::Json;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use collabhub_core::error::AppError;
use collabhub_core::types::{FileId, ProjectId};
use collabhub_entity::File;

use crate::dto::request::{
    CreateFileBody, CreateFilesBody, RestoreVersionBody, UpdateContentBody, UpdateFileBody,
};
use crate::dto::response::ApiResponse;
use crate::extractors::{ValidatedJson, parse_id};
use crate::state::AppState;

/// GET /api/files
pub async fn list_files(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<File>>>, AppError> {
    let files = state.services.files.list_files().await?;
    Ok(Json(ApiResponse::ok(files)))
}

/// POST /api/files
pub async fn create_file(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateFileBody>,
) -> Result<impl IntoResponse, AppError> {
    let file = state.services.files.create_file(body.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(file))))
}

/// POST /api/files/batch
pub async fn create_files(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateFilesBody>,
) -> Result<impl IntoResponse, AppError> {
    let batch = body.files.into_iter().map(Into::into).collect();
    let files = state.services.files.create_files(batch).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(files))))
}

/// GET /api/files/{id}
pub async fn get_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<File>>, AppError> {
    let file = state.services.files.get_file(parse_id(&id)?).await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// PUT /api/files/{id}
pub async fn update_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateFileBody>,
) -> Result<Json<ApiResponse<File>>, AppError> {
    let file = state
        .services
        .files
        .update_file_metadata(parse_id(&id)?, body.into())
        .await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// DELETE /api/files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.services.files.delete_file(parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/files/{id}/content
///
/// Returns the live bytes. Content changes in place, so responses are
/// marked uncacheable.
pub async fn read_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let (file, data) = state.services.files.read_content(parse_id(&id)?).await?;

    // Rows written before content types were validated may not be legal
    // header values.
    let content_type = if file.has_inline_path() {
        HeaderValue::from_static("text/plain; charset=utf-8")
    } else {
        HeaderValue::from_str(&file.content_type)
            .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"))
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, data.len())
        .header(header::CACHE_CONTROL, "no-cache, no-store, must-revalidate")
        .header(header::PRAGMA, "no-cache")
        .header(header::EXPIRES, "0")
        .body(Body::from(data))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))
}

/// PUT /api/files/{id}/content
pub async fn update_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateContentBody>,
) -> Result<Json<ApiResponse<File>>, AppError> {
    let file = state
        .services
        .files
        .update_file_content(parse_id(&id)?, body.content, body.actor_user_id)
        .await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// POST /api/files/{id}/restore
pub async fn restore_version(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<RestoreVersionBody>,
) -> Result<Json<ApiResponse<File>>, AppError> {
    let file_id: FileId = parse_id(&id)?;
    let file = state
        .services
        .versions
        .restore_version(file_id, body.version_id, body.actor_user_id)
        .await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// GET /api/files/project/{project_id}
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<File>>>, AppError> {
    let project_id: ProjectId = parse_id(&project_id)?;
    let files = state
        .services
        .files
        .get_files_by_project(project_id)
        .await?;
    Ok(Json(ApiResponse::ok(files)))
}
