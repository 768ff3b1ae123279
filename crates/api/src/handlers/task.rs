//! Handlers for the `/tasks` resource.
//!
//! Tasks are always accessed through their parent project; every endpoint
//! requires authentication and verifies ownership.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use validator::Validate;

use taskdeck_core::error::CoreError;
use taskdeck_core::models::TaskStatus;
use taskdeck_core::types::{DocId, Timestamp};
use taskdeck_store::repositories::{NewTask, ProjectRepo, TaskPatch, TaskRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{MessageResponse, TaskListResponse, TaskResponse};
use crate::state::AppState;

/// Query parameters for `GET /api/tasks`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListParams {
    pub project_id: Option<String>,
}

/// Request body for `POST /api/tasks`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub project_id: String,
    pub due_date: Option<String>,
    /// Accepted for wire compatibility but ignored: new tasks always
    /// start as `Todo`.
    #[serde(default)]
    #[allow(dead_code)]
    status: Option<serde_json::Value>,
}

/// Request body for `PUT /api/tasks/{id}`. All fields optional; at least
/// one must be present.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateTaskRequest {
    pub status: Option<TaskStatus>,
    pub title: Option<String>,
    /// `Some(None)` (an explicit JSON `null`) clears the due date;
    /// an omitted field leaves it untouched.
    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<String>>,
}

/// Deserialize helper that distinguishes a missing field from an explicit
/// `null`. Combined with `#[serde(default)]`, a missing field stays `None`
/// while `null` becomes `Some(None)`.
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// GET /api/tasks?projectId={id}
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<TaskListParams>,
) -> AppResult<Json<TaskListResponse>> {
    let project_id = params.project_id.unwrap_or_default();
    if project_id.is_empty() {
        return Err(CoreError::Validation("Project ID is required".into()).into());
    }

    let tasks = TaskRepo::list_for_project(state.store.as_ref(), &project_id, &user.user_id).await?;
    Ok(Json(TaskListResponse {
        success: true,
        tasks,
    }))
}

/// POST /api/tasks
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<serde_json::Value>,
) -> AppResult<Json<TaskResponse>> {
    let input: CreateTaskRequest = serde_json::from_value(body)
        .map_err(|_| CoreError::Validation("Title and project ID are required".into()))?;
    input
        .validate()
        .map_err(|_| CoreError::Validation("Title and project ID are required".into()))?;

    let due_date = match input.due_date.as_deref() {
        Some(raw) => parse_due_date(raw)?,
        None => None,
    };

    // Ownership is derived from the parent project; a caller-supplied
    // user id is never trusted.
    let project = ProjectRepo::find_by_id(state.store.as_ref(), &input.project_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Project",
                id: input.project_id.clone(),
            })
        })?;
    if project.user_id != user.user_id {
        return Err(CoreError::Forbidden("Unauthorized".into()).into());
    }

    let task = TaskRepo::create(
        state.store.as_ref(),
        &NewTask {
            title: input.title,
            project_id: input.project_id,
            user_id: project.user_id,
            due_date,
        },
    )
    .await?;

    tracing::info!(task_id = %task.id, project_id = %task.project_id, "task created");
    Ok(Json(TaskResponse {
        success: true,
        task,
    }))
}

/// PUT /api/tasks/{id}
///
/// Partial update: only the fields present in the body change. Responds
/// with an acknowledgement message rather than the updated document.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DocId>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<Json<MessageResponse>> {
    let input: UpdateTaskRequest = serde_json::from_value(body)
        .map_err(|e| CoreError::Validation(format!("Invalid request body: {e}")))?;

    if input.status.is_none() && input.title.is_none() && input.due_date.is_none() {
        return Err(
            CoreError::Validation("At least one field to update is required".into()).into(),
        );
    }
    if let Some(title) = &input.title {
        if title.is_empty() {
            return Err(CoreError::Validation("Title must not be empty".into()).into());
        }
    }

    let due_date = match &input.due_date {
        Some(Some(raw)) => Some(parse_due_date(raw)?),
        Some(None) => Some(None),
        None => None,
    };

    let existing = TaskRepo::find_by_id(state.store.as_ref(), &id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Task",
                id: id.clone(),
            })
        })?;
    if existing.user_id != user.user_id {
        return Err(CoreError::Forbidden("Unauthorized".into()).into());
    }

    TaskRepo::update(
        state.store.as_ref(),
        &id,
        &TaskPatch {
            title: input.title,
            status: input.status,
            due_date,
        },
    )
    .await?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Task updated successfully".to_string(),
    }))
}

/// DELETE /api/tasks/{id}
///
/// Idempotent: deleting an id that does not resolve still succeeds.
/// Ownership is verified only when the task exists.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DocId>,
) -> AppResult<Json<MessageResponse>> {
    if let Some(existing) = TaskRepo::find_by_id(state.store.as_ref(), &id).await? {
        if existing.user_id != user.user_id {
            return Err(CoreError::Forbidden("Unauthorized".into()).into());
        }
        TaskRepo::delete(state.store.as_ref(), &id).await?;
        tracing::info!(task_id = %id, "task deleted");
    }

    Ok(Json(MessageResponse {
        success: true,
        message: "Task deleted successfully".to_string(),
    }))
}

/// Parse a caller-supplied due date string.
///
/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates (interpreted
/// as UTC midnight). An empty or whitespace-only string means "no due
/// date".
fn parse_due_date(raw: &str) -> Result<Option<Timestamp>, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(Some(DateTime::from_naive_utc_and_offset(naive, Utc)));
        }
    }

    Err(CoreError::Validation(format!("Invalid due date: '{trimmed}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339_due_date() {
        let parsed = parse_due_date("2026-03-01T12:30:00Z").unwrap();
        let dt = parsed.expect("should produce a timestamp");
        assert_eq!(dt.to_rfc3339(), "2026-03-01T12:30:00+00:00");
    }

    #[test]
    fn parses_plain_date_as_utc_midnight() {
        let parsed = parse_due_date("2026-03-01").unwrap();
        let dt = parsed.expect("should produce a timestamp");
        assert_eq!(dt.to_rfc3339(), "2026-03-01T00:00:00+00:00");
    }

    #[test]
    fn empty_due_date_means_none() {
        assert_eq!(parse_due_date("").unwrap(), None);
        assert_eq!(parse_due_date("   ").unwrap(), None);
    }

    #[test]
    fn rejects_garbage_due_date() {
        assert!(parse_due_date("next tuesday").is_err());
    }

    #[test]
    fn update_body_distinguishes_null_from_missing() {
        let with_null: UpdateTaskRequest =
            serde_json::from_value(serde_json::json!({ "dueDate": null })).unwrap();
        assert_eq!(with_null.due_date, Some(None));

        let missing: UpdateTaskRequest =
            serde_json::from_value(serde_json::json!({ "title": "x" })).unwrap();
        assert_eq!(missing.due_date, None);
    }
}
