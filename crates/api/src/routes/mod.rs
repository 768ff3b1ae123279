pub mod auth;
pub mod health;
pub mod project;
pub mod task;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register    register (public)
/// /auth/login       login (public)
/// /auth/logout      logout (requires auth)
/// /auth/me          current user (requires auth)
///
/// /projects         list, create
/// /projects/{id}    update, delete
///
/// /tasks            list (?projectId=), create
/// /tasks/{id}       update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/projects", project::router())
        .nest("/tasks", task::router())
}
