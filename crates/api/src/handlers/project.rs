//! Handlers for the `/projects` resource.
//!
//! Every endpoint requires authentication; all reads and writes are
//! scoped to the caller's own projects.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use taskdeck_core::error::CoreError;
use taskdeck_core::types::DocId;
use taskdeck_store::repositories::{NewProject, ProjectPatch, ProjectRepo, TaskRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{MessageResponse, ProjectListResponse, ProjectResponse};
use crate::state::AppState;

/// Request body for `POST /api/projects` and `PUT /api/projects/{id}`.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ProjectBody {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
}

/// GET /api/projects
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ProjectListResponse>> {
    let projects = ProjectRepo::list_for_user(state.store.as_ref(), &user.user_id).await?;
    Ok(Json(ProjectListResponse {
        success: true,
        projects,
    }))
}

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<serde_json::Value>,
) -> AppResult<Json<ProjectResponse>> {
    let input = parse_body(body)?;

    let project = ProjectRepo::create(
        state.store.as_ref(),
        &NewProject {
            name: input.name,
            description: input.description,
            user_id: user.user_id,
        },
    )
    .await?;

    tracing::info!(project_id = %project.id, "project created");
    Ok(Json(ProjectResponse {
        success: true,
        project,
    }))
}

/// PUT /api/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DocId>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<Json<ProjectResponse>> {
    let input = parse_body(body)?;

    check_ownership(&state, &id, &user).await?;

    let project = ProjectRepo::update(
        state.store.as_ref(),
        &id,
        &ProjectPatch {
            name: input.name,
            description: input.description,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Project",
        id,
    }))?;

    Ok(Json(ProjectResponse {
        success: true,
        project,
    }))
}

/// DELETE /api/projects/{id}
///
/// Cascades to the project's tasks: all task documents belonging to the
/// project are removed as one batch after the project document itself.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DocId>,
) -> AppResult<Json<MessageResponse>> {
    check_ownership(&state, &id, &user).await?;

    ProjectRepo::delete(state.store.as_ref(), &id).await?;
    let removed = TaskRepo::delete_for_project(state.store.as_ref(), &id, &user.user_id).await?;
    tracing::info!(project_id = %id, tasks_removed = removed, "project deleted");

    Ok(Json(MessageResponse {
        success: true,
        message: "Project and associated tasks deleted successfully".to_string(),
    }))
}

/// Parse and validate a project body, mapping failures to the API's
/// validation message.
fn parse_body(body: serde_json::Value) -> Result<ProjectBody, AppError> {
    let input: ProjectBody = serde_json::from_value(body)
        .map_err(|_| CoreError::Validation("Name and description are required".into()))?;
    input
        .validate()
        .map_err(|_| CoreError::Validation("Name and description are required".into()))?;
    Ok(input)
}

/// Confirm the project exists and belongs to the caller.
async fn check_ownership(state: &AppState, id: &DocId, user: &AuthUser) -> Result<(), AppError> {
    let existing = ProjectRepo::find_by_id(state.store.as_ref(), id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Project",
                id: id.clone(),
            })
        })?;

    if existing.user_id != user.user_id {
        return Err(CoreError::Forbidden("Unauthorized".into()).into());
    }
    Ok(())
}
