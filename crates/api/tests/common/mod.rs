//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the full application router over a fresh in-memory document
//! store, mirroring the construction in `main.rs` so tests exercise the
//! same middleware stack production uses.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use taskdeck_api::auth::identity::{IdentityService, JwtIdentity};
use taskdeck_api::auth::jwt::JwtConfig;
use taskdeck_api::config::{ServerConfig, StoreBackend};
use taskdeck_api::router::build_app_router;
use taskdeck_api::state::AppState;
use taskdeck_store::{DocumentStore, MemoryStore};

/// Build a test `ServerConfig` with a known JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store_backend: StoreBackend::Memory,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router over a fresh in-memory store.
pub fn build_test_app() -> Router {
    let config = test_config();
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    let identity: Arc<dyn IdentityService> =
        Arc::new(JwtIdentity::new(Arc::clone(&store), config.jwt.clone()));
    let state = AppState {
        store,
        identity,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Send a single request through the router.
async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request should build"),
        None => builder.body(Body::empty()).expect("request should build"),
    };
    app.oneshot(request).await.expect("request should complete")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, Some(token)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), Some(token)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body), Some(token)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None, Some(token)).await
}

/// Read and parse a JSON response body.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

/// Register a user via the API and return `(token, uid)`.
pub async fn register_user(app: &Router, email: &str) -> (String, String) {
    let body = serde_json::json!({
        "email": email,
        "password": "test_password_123!",
        "displayName": "Test User",
    });
    let response = post_json(app.clone(), "/api/auth/register", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let json = body_json(response).await;
    let token = json["token"].as_str().expect("token present").to_string();
    let uid = json["user"]["uid"].as_str().expect("uid present").to_string();
    (token, uid)
}

/// Create a project via the API and return its id.
pub async fn create_project(app: &Router, token: &str, name: &str) -> String {
    let body = serde_json::json!({ "name": name, "description": "test project" });
    let response = post_json_auth(app.clone(), "/api/projects", body, token).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let json = body_json(response).await;
    json["project"]["id"]
        .as_str()
        .expect("project id present")
        .to_string()
}

/// Create a task via the API and return its id.
pub async fn create_task(app: &Router, token: &str, project_id: &str, title: &str) -> String {
    let body = serde_json::json!({ "title": title, "projectId": project_id });
    let response = post_json_auth(app.clone(), "/api/tasks", body, token).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let json = body_json(response).await;
    json["task"]["id"].as_str().expect("task id present").to_string()
}
