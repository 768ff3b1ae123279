//! Repository for the `tasks` collection.

use chrono::Utc;
use serde_json::{json, Map, Value};

use taskdeck_core::models::{Task, TaskStatus};
use taskdeck_core::types::{DocId, Timestamp};

use crate::document::{DocumentStore, Filter, StoreError};

/// Collection name in the backing store.
const COLLECTION: &str = "tasks";

/// Input for creating a task.
///
/// `user_id` must be the parent project's owner; handlers derive it from
/// the project document rather than trusting caller input.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub project_id: DocId,
    pub user_id: DocId,
    pub due_date: Option<Timestamp>,
}

/// Fields overwritten by a task update. Only supplied fields are written.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub status: Option<TaskStatus>,
    /// `Some(None)` clears the due date; `None` leaves it untouched.
    pub due_date: Option<Option<Timestamp>>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.status.is_none() && self.due_date.is_none()
    }
}

/// Provides CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task. Status is always `Todo` on creation, whatever
    /// the caller asked for upstream.
    pub async fn create(store: &dyn DocumentStore, input: &NewTask) -> Result<Task, StoreError> {
        let now = Utc::now();
        let data = json!({
            "title": input.title,
            "status": TaskStatus::Todo,
            "projectId": input.project_id,
            "userId": input.user_id,
            "dueDate": input.due_date,
            "createdAt": now,
            "updatedAt": now,
        });
        let id = store.add(COLLECTION, data).await?;
        Ok(Task {
            id,
            title: input.title.clone(),
            status: TaskStatus::Todo,
            due_date: input.due_date,
            project_id: input.project_id.clone(),
            user_id: input.user_id.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Find a task by id.
    pub async fn find_by_id(
        store: &dyn DocumentStore,
        id: &str,
    ) -> Result<Option<Task>, StoreError> {
        match store.get(COLLECTION, id).await? {
            Some(doc) => Ok(Some(doc.decode()?)),
            None => Ok(None),
        }
    }

    /// List all tasks in `project_id` owned by `user_id`, most recently
    /// created first. Filtering on both fields avoids needing any
    /// compound index in the store.
    pub async fn list_for_project(
        store: &dyn DocumentStore,
        project_id: &str,
        user_id: &str,
    ) -> Result<Vec<Task>, StoreError> {
        let filters = [
            Filter::eq("projectId", project_id),
            Filter::eq("userId", user_id),
        ];
        let docs = store.find(COLLECTION, &filters).await?;
        let mut tasks = docs
            .iter()
            .map(|doc| doc.decode())
            .collect::<Result<Vec<Task>, _>>()?;
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    /// Apply a partial update. `updatedAt` is always refreshed; a cleared
    /// due date is written as an explicit null.
    pub async fn update(
        store: &dyn DocumentStore,
        id: &str,
        patch: &TaskPatch,
    ) -> Result<(), StoreError> {
        let mut fields = Map::new();
        fields.insert("updatedAt".to_string(), json!(Utc::now()));
        if let Some(title) = &patch.title {
            fields.insert("title".to_string(), json!(title));
        }
        if let Some(status) = patch.status {
            fields.insert("status".to_string(), json!(status));
        }
        if let Some(due_date) = &patch.due_date {
            fields.insert("dueDate".to_string(), json!(due_date));
        }
        store.update(COLLECTION, id, Value::Object(fields)).await
    }

    /// Permanently delete a task document. Deleting a missing id is a no-op.
    pub async fn delete(store: &dyn DocumentStore, id: &str) -> Result<(), StoreError> {
        store.delete(COLLECTION, id).await
    }

    /// Delete every task in `project_id` owned by `user_id` as a single
    /// batch, returning how many were removed. Used by the project-delete
    /// cascade.
    pub async fn delete_for_project(
        store: &dyn DocumentStore,
        project_id: &str,
        user_id: &str,
    ) -> Result<usize, StoreError> {
        let filters = [
            Filter::eq("projectId", project_id),
            Filter::eq("userId", user_id),
        ];
        let docs = store.find(COLLECTION, &filters).await?;
        let ids: Vec<DocId> = docs.into_iter().map(|doc| doc.id).collect();
        if !ids.is_empty() {
            store.batch_delete(COLLECTION, &ids).await?;
        }
        Ok(ids.len())
    }
}
