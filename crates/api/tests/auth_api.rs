//! HTTP-level integration tests for the auth endpoints.
//!
//! Tests cover registration, login, session restoration via `/me`,
//! logout, and the bearer-token requirements on protected routes.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json, post_json_auth, register_user};

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Successful registration returns a token and the public user record.
#[tokio::test]
async fn test_register_success() {
    let app = common::build_test_app();

    let body = serde_json::json!({
        "email": "new@example.com",
        "password": "test_password_123!",
        "displayName": "New User",
    });
    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(json["token"].is_string(), "response must contain token");
    assert!(json["expiresIn"].is_number(), "response must contain expiresIn");
    assert_eq!(json["user"]["email"], "new@example.com");
    assert_eq!(json["user"]["displayName"], "New User");
    assert!(json["user"]["uid"].is_string());
}

/// Registering the same email twice returns 400 with a helpful message.
#[tokio::test]
async fn test_register_duplicate_email() {
    let app = common::build_test_app();
    register_user(&app, "dup@example.com").await;

    let body = serde_json::json!({
        "email": "dup@example.com",
        "password": "another_password_456!",
    });
    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert!(
        json["error"].as_str().unwrap().contains("already exists"),
        "error should mention the duplicate"
    );
}

/// Missing email or password returns 400.
#[tokio::test]
async fn test_register_missing_fields() {
    let app = common::build_test_app();

    let response = post_json(
        app.clone(),
        "/api/auth/register",
        serde_json::json!({ "email": "x@example.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Email and password are required");

    let response = post_json(
        app,
        "/api/auth/register",
        serde_json::json!({ "password": "test_password_123!" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Malformed email address returns 400.
#[tokio::test]
async fn test_register_invalid_email() {
    let app = common::build_test_app();

    let body = serde_json::json!({ "email": "not-an-email", "password": "test_password_123!" });
    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Invalid email format"));
}

/// A too-short password is rejected with the minimum stated.
#[tokio::test]
async fn test_register_weak_password() {
    let app = common::build_test_app();

    let body = serde_json::json!({ "email": "weak@example.com", "password": "abc" });
    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("at least 6 characters"));
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Successful login returns a fresh token and the user record.
#[tokio::test]
async fn test_login_success() {
    let app = common::build_test_app();
    let (_token, uid) = register_user(&app, "login@example.com").await;

    let body = serde_json::json!({ "email": "login@example.com", "password": "test_password_123!" });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(json["token"].is_string());
    assert_eq!(json["user"]["uid"], uid.as_str());
}

/// Login with a wrong password returns 401 without leaking which part
/// was wrong.
#[tokio::test]
async fn test_login_wrong_password() {
    let app = common::build_test_app();
    register_user(&app, "wrongpw@example.com").await;

    let body = serde_json::json!({ "email": "wrongpw@example.com", "password": "incorrect!" });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid email or password");
}

/// Login with an unknown email returns the same 401 as a wrong password.
#[tokio::test]
async fn test_login_unknown_email() {
    let app = common::build_test_app();

    let body = serde_json::json!({ "email": "ghost@example.com", "password": "whatever1" });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid email or password");
}

// ---------------------------------------------------------------------------
// Session restoration and logout
// ---------------------------------------------------------------------------

/// `/me` resolves a valid token to the user's public record.
#[tokio::test]
async fn test_me_with_valid_token() {
    let app = common::build_test_app();
    let (token, uid) = register_user(&app, "me@example.com").await;

    let response = get_auth(app, "/api/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["user"]["uid"], uid.as_str());
    assert_eq!(json["user"]["email"], "me@example.com");
}

/// `/me` with a garbage token returns 401.
#[tokio::test]
async fn test_me_with_invalid_token() {
    let app = common::build_test_app();

    let response = get_auth(app, "/api/auth/me", "not-a-real-token").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid or expired token");
}

/// Logout acknowledges with a success message.
#[tokio::test]
async fn test_logout() {
    let app = common::build_test_app();
    let (token, _uid) = register_user(&app, "logout@example.com").await;

    let response =
        post_json_auth(app, "/api/auth/logout", serde_json::json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Logged out successfully");
}

/// Logout without a token is rejected.
#[tokio::test]
async fn test_logout_requires_auth() {
    let app = common::build_test_app();

    let response = post_json(app, "/api/auth/logout", serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
