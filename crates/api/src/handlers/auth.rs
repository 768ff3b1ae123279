//! Handlers for the `/auth` endpoints (register, login, logout, me).

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use taskdeck_core::error::CoreError;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::{AuthResponse, MessageResponse, UserResponse};
use crate::state::AppState;

/// Request body for `POST /api/auth/register`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<Json<AuthResponse>> {
    let input: RegisterRequest = serde_json::from_value(body)
        .map_err(|_| CoreError::Validation("Email and password are required".into()))?;

    if input.email.is_empty() || input.password.is_empty() {
        return Err(CoreError::Validation("Email and password are required".into()).into());
    }
    if input.validate().is_err() {
        return Err(CoreError::Validation(
            "Invalid email format. Please enter a valid email address.".into(),
        )
        .into());
    }

    let session = state
        .identity
        .create_user(&input.email, &input.password, input.display_name.as_deref())
        .await?;

    Ok(Json(AuthResponse {
        success: true,
        token: session.token,
        expires_in: session.expires_in,
        user: session.user,
    }))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<Json<AuthResponse>> {
    let input: LoginRequest = serde_json::from_value(body)
        .map_err(|_| CoreError::Validation("Email and password are required".into()))?;

    if input.email.is_empty() || input.password.is_empty() {
        return Err(CoreError::Validation("Email and password are required".into()).into());
    }

    let session = state
        .identity
        .sign_in_with_password(&input.email, &input.password)
        .await?;

    Ok(Json(AuthResponse {
        success: true,
        token: session.token,
        expires_in: session.expires_in,
        user: session.user,
    }))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<MessageResponse>> {
    state.identity.sign_out(&user.user_id).await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "Logged out successfully".to_string(),
    }))
}

/// GET /api/auth/me
///
/// Restores a session from a stored token: resolves the caller's public
/// user record. Fails with 401 if the account no longer exists.
pub async fn me(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<UserResponse>> {
    let record = state
        .identity
        .lookup_user(&user.user_id)
        .await?
        .ok_or_else(|| CoreError::Unauthorized("User no longer exists".into()))?;

    Ok(Json(UserResponse {
        success: true,
        user: record,
    }))
}
