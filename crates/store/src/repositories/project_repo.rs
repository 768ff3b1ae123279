//! Repository for the `projects` collection.

use chrono::Utc;
use serde_json::json;

use taskdeck_core::models::Project;
use taskdeck_core::types::DocId;

use crate::document::{DocumentStore, Filter, StoreError};

/// Collection name in the backing store.
const COLLECTION: &str = "projects";

/// Input for creating a project.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub user_id: DocId,
}

/// Fields overwritten by a project update. Both are always required by
/// the API, so neither is optional here.
#[derive(Debug, Clone)]
pub struct ProjectPatch {
    pub name: String,
    pub description: String,
}

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created document with its
    /// store-assigned id. Both timestamps are stamped to the request time.
    pub async fn create(
        store: &dyn DocumentStore,
        input: &NewProject,
    ) -> Result<Project, StoreError> {
        let now = Utc::now();
        let data = json!({
            "name": input.name,
            "description": input.description,
            "userId": input.user_id,
            "createdAt": now,
            "updatedAt": now,
        });
        let id = store.add(COLLECTION, data).await?;
        Ok(Project {
            id,
            name: input.name.clone(),
            description: input.description.clone(),
            user_id: input.user_id.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Find a project by id.
    pub async fn find_by_id(
        store: &dyn DocumentStore,
        id: &str,
    ) -> Result<Option<Project>, StoreError> {
        match store.get(COLLECTION, id).await? {
            Some(doc) => Ok(Some(doc.decode()?)),
            None => Ok(None),
        }
    }

    /// List all projects owned by `user_id`, most recently created first.
    /// No pagination; every matching document is returned.
    pub async fn list_for_user(
        store: &dyn DocumentStore,
        user_id: &str,
    ) -> Result<Vec<Project>, StoreError> {
        let docs = store
            .find(COLLECTION, &[Filter::eq("userId", user_id)])
            .await?;
        let mut projects = docs
            .iter()
            .map(|doc| doc.decode())
            .collect::<Result<Vec<Project>, _>>()?;
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(projects)
    }

    /// Overwrite name and description and refresh `updatedAt`, returning
    /// the updated document. Returns `None` if the project no longer exists.
    pub async fn update(
        store: &dyn DocumentStore,
        id: &str,
        patch: &ProjectPatch,
    ) -> Result<Option<Project>, StoreError> {
        let data = json!({
            "name": patch.name,
            "description": patch.description,
            "updatedAt": Utc::now(),
        });
        match store.update(COLLECTION, id, data).await {
            Ok(()) => Self::find_by_id(store, id).await,
            Err(StoreError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Permanently delete a project document. Tasks are cascaded separately
    /// by [`TaskRepo::delete_for_project`](crate::repositories::TaskRepo::delete_for_project).
    pub async fn delete(store: &dyn DocumentStore, id: &str) -> Result<(), StoreError> {
        store.delete(COLLECTION, id).await
    }
}
