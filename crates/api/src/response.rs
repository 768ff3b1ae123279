//! Shared response envelope types for API handlers.
//!
//! All success responses carry `"success": true` plus the payload under a
//! resource-specific key; error responses are produced by
//! [`AppError`](crate::error::AppError) as `{ "error": message }`.

use serde::Serialize;
use taskdeck_core::models::{Project, Task, User};

/// `{ "success": true, "projects": [...] }`
#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub success: bool,
    pub projects: Vec<Project>,
}

/// `{ "success": true, "project": {...} }`
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub success: bool,
    pub project: Project,
}

/// `{ "success": true, "tasks": [...] }`
#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    pub success: bool,
    pub tasks: Vec<Task>,
}

/// `{ "success": true, "task": {...} }`
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub success: bool,
    pub task: Task,
}

/// `{ "success": true, "user": {...} }`
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub success: bool,
    pub user: User,
}

/// Token-bearing response returned by register and login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: User,
}

/// `{ "success": true, "message": "..." }`
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}
