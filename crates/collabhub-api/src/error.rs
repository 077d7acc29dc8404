//! Error bodies returned by the API.
//!
//! `AppError` renders itself through the `axum` feature of
//! `collabhub-core`; handlers return `AppResult` directly.

pub use collabhub_core::http::ApiErrorResponse;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use collabhub_core::error::AppError;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::not_found("gone"), StatusCode::NOT_FOUND),
            (AppError::validation("bad"), StatusCode::BAD_REQUEST),
            (AppError::conflict("dup"), StatusCode::CONFLICT),
            (AppError::storage("disk"), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::database("pg"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[tokio::test]
    async fn test_internal_detail_is_hidden() {
        let response = AppError::database("relation \"files\" does not exist").into_response();
        let bytes = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .unwrap();
        let body: ApiErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, "INTERNAL_ERROR");
        assert!(!body.message.contains("relation"));
    }

    #[tokio::test]
    async fn test_storage_detail_is_hidden() {
        let response = AppError::storage("disk full at /var/uploads").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .unwrap();
        let body: ApiErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, "STORAGE_ERROR");
        assert_eq!(body.message, "Storage operation failed");
    }
}
