//! Shared test helpers for integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use collabhub_api::{AppState, build_app};
use collabhub_core::config::AppConfig;
use collabhub_core::types::{ProjectId, UserId};
use collabhub_database::{MemoryDatabase, Repositories};
use collabhub_service::Services;
use collabhub_storage::{BlobStore, MemoryStorageProvider};

/// Test application backed by in-memory repositories and storage.
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing database, for seeding and inspection
    pub db: MemoryDatabase,
    /// Backing blob storage
    pub storage: MemoryStorageProvider,
    /// A project that exists
    pub project: ProjectId,
    /// A user that exists
    pub user: UserId,
}

impl TestApp {
    /// Create a new test application with one project and one user.
    pub async fn new() -> Self {
        let db = MemoryDatabase::new();
        let storage = MemoryStorageProvider::new();

        let project = ProjectId::new();
        let user = UserId::new();
        db.insert_project(project).await;
        db.insert_user(user).await;

        let blobs = BlobStore::new(Arc::new(storage.clone()), "uploads");
        let services = Services::new(&Repositories::memory(&db), blobs.clone());
        let state = AppState::new(AppConfig::default(), None, blobs, services);

        Self {
            router: build_app(state),
            db,
            storage,
            project,
            user,
        }
    }

    /// Send a request with an optional JSON body.
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body = match body {
            Some(value) => Body::from(serde_json::to_vec(&value).expect("serialize body")),
            None => Body::empty(),
        };
        self.send(
            Request::builder()
                .method(method)
                .uri(path)
                .header("Content-Type", "application/json")
                .body(body)
                .expect("build request"),
        )
        .await
    }

    /// Send a request with a raw, unparsed body.
    pub async fn request_raw(&self, method: &str, path: &str, body: &'static str) -> TestResponse {
        self.send(
            Request::builder()
                .method(method)
                .uri(path)
                .header("Content-Type", "application/json")
                .body(Body::from(body))
                .expect("build request"),
        )
        .await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("read body");
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
            bytes,
        }
    }

    /// Create a file through the API and return its id.
    pub async fn create_file(&self, name: &str, content: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/files",
                Some(serde_json::json!({
                    "name": name,
                    "content": content,
                    "project_id": self.project,
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.id()
    }

    /// Replace a file's live content through the API.
    pub async fn update_content(&self, file_id: &str, content: &str) -> TestResponse {
        self.request(
            "PUT",
            &format!("/api/files/{file_id}/content"),
            Some(serde_json::json!({ "content": content })),
        )
        .await
    }

    /// Read a file's live content as text.
    pub async fn content(&self, file_id: &str) -> String {
        let response = self
            .request("GET", &format!("/api/files/{file_id}/content"), None)
            .await;
        assert_eq!(response.status, StatusCode::OK);
        String::from_utf8(response.bytes.to_vec()).expect("utf-8 content")
    }

    /// Change types of a file's history, newest first.
    pub async fn change_types(&self, file_id: &str) -> Vec<String> {
        let response = self
            .request("GET", &format!("/api/file-history/file/{file_id}"), None)
            .await;
        assert_eq!(response.status, StatusCode::OK);
        response
            .items()
            .iter()
            .map(|e| e["change_type"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body, `Null` when the body is not JSON
    pub body: Value,
    /// Raw body bytes
    pub bytes: Bytes,
}

impl TestResponse {
    /// `data.id` of a single-resource response.
    pub fn id(&self) -> String {
        self.body["data"]["id"]
            .as_str()
            .expect("response has data.id")
            .to_string()
    }

    /// `data` of a list response.
    pub fn items(&self) -> Vec<Value> {
        self.body["data"].as_array().cloned().unwrap_or_default()
    }

    /// Machine-readable error code of an error response.
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}
