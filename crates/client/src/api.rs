//! HTTP client for the taskdeck API.
//!
//! Thin typed wrapper over `reqwest`: one method per endpoint, with the
//! server's `{ "error": message }` bodies surfaced as [`ClientError::Api`].

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};

use taskdeck_core::models::{Project, Task, User};
use taskdeck_core::types::Timestamp;

use crate::action::TaskChanges;

/// Errors produced by [`ApiClient`] calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with an `{ "error": ... }` body.
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// The request never completed (connection refused, timeout, ...).
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// An operation that needs a session ran without one.
    #[error("No authentication token")]
    MissingToken,
}

/// A session issued by the register and login endpoints.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Deserialize)]
struct AuthEnvelope {
    token: String,
    user: User,
}

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: User,
}

#[derive(Debug, Deserialize)]
struct ProjectEnvelope {
    project: Project,
}

#[derive(Debug, Deserialize)]
struct ProjectListEnvelope {
    projects: Vec<Project>,
}

#[derive(Debug, Deserialize)]
struct TaskEnvelope {
    task: Task,
}

#[derive(Debug, Deserialize)]
struct TaskListEnvelope {
    tasks: Vec<Task>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Typed HTTP client bound to one server base URL.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Turn a non-2xx response into [`ClientError::Api`], extracting the
    /// server's error message when the body has one.
    async fn expect_ok(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => format!("Request failed with status {status}"),
        };
        tracing::debug!(%status, %message, "api request failed");
        Err(ClientError::Api { status, message })
    }

    // --- auth --------------------------------------------------------------

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<Session, ClientError> {
        let mut body = json!({ "email": email, "password": password });
        if let Some(name) = display_name {
            body["displayName"] = json!(name);
        }
        let response = self
            .http
            .post(self.url("/api/auth/register"))
            .json(&body)
            .send()
            .await?;
        let envelope: AuthEnvelope = Self::expect_ok(response).await?.json().await?;
        Ok(Session {
            token: envelope.token,
            user: envelope.user,
        })
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        let body = json!({ "email": email, "password": password });
        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&body)
            .send()
            .await?;
        let envelope: AuthEnvelope = Self::expect_ok(response).await?.json().await?;
        Ok(Session {
            token: envelope.token,
            user: envelope.user,
        })
    }

    pub async fn me(&self, token: &str) -> Result<User, ClientError> {
        let response = self
            .http
            .get(self.url("/api/auth/me"))
            .bearer_auth(token)
            .send()
            .await?;
        let envelope: UserEnvelope = Self::expect_ok(response).await?.json().await?;
        Ok(envelope.user)
    }

    pub async fn logout(&self, token: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.url("/api/auth/logout"))
            .bearer_auth(token)
            .send()
            .await?;
        Self::expect_ok(response).await?;
        Ok(())
    }

    // --- projects ----------------------------------------------------------

    pub async fn list_projects(&self, token: &str) -> Result<Vec<Project>, ClientError> {
        let response = self
            .http
            .get(self.url("/api/projects"))
            .bearer_auth(token)
            .send()
            .await?;
        let envelope: ProjectListEnvelope = Self::expect_ok(response).await?.json().await?;
        Ok(envelope.projects)
    }

    pub async fn create_project(
        &self,
        token: &str,
        name: &str,
        description: &str,
    ) -> Result<Project, ClientError> {
        let body = json!({ "name": name, "description": description });
        let response = self
            .http
            .post(self.url("/api/projects"))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        let envelope: ProjectEnvelope = Self::expect_ok(response).await?.json().await?;
        Ok(envelope.project)
    }

    pub async fn update_project(
        &self,
        token: &str,
        id: &str,
        name: &str,
        description: &str,
    ) -> Result<Project, ClientError> {
        let body = json!({ "name": name, "description": description });
        let response = self
            .http
            .put(self.url(&format!("/api/projects/{id}")))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        let envelope: ProjectEnvelope = Self::expect_ok(response).await?.json().await?;
        Ok(envelope.project)
    }

    pub async fn delete_project(&self, token: &str, id: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/api/projects/{id}")))
            .bearer_auth(token)
            .send()
            .await?;
        Self::expect_ok(response).await?;
        Ok(())
    }

    // --- tasks -------------------------------------------------------------

    pub async fn list_tasks(&self, token: &str, project_id: &str) -> Result<Vec<Task>, ClientError> {
        let response = self
            .http
            .get(self.url("/api/tasks"))
            .query(&[("projectId", project_id)])
            .bearer_auth(token)
            .send()
            .await?;
        let envelope: TaskListEnvelope = Self::expect_ok(response).await?.json().await?;
        Ok(envelope.tasks)
    }

    pub async fn create_task(
        &self,
        token: &str,
        title: &str,
        project_id: &str,
        due_date: Option<Timestamp>,
    ) -> Result<Task, ClientError> {
        let mut body = json!({ "title": title, "projectId": project_id });
        if let Some(due) = due_date {
            body["dueDate"] = json!(due.to_rfc3339());
        }
        let response = self
            .http
            .post(self.url("/api/tasks"))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        let envelope: TaskEnvelope = Self::expect_ok(response).await?.json().await?;
        Ok(envelope.task)
    }

    /// Send a partial task update. The server acknowledges without
    /// echoing the document.
    pub async fn update_task(
        &self,
        token: &str,
        id: &str,
        changes: &TaskChanges,
    ) -> Result<(), ClientError> {
        let mut body = serde_json::Map::new();
        if let Some(title) = &changes.title {
            body.insert("title".to_string(), json!(title));
        }
        if let Some(status) = changes.status {
            body.insert("status".to_string(), json!(status));
        }
        if let Some(due_date) = &changes.due_date {
            let value = match due_date {
                Some(ts) => json!(ts.to_rfc3339()),
                None => Value::Null,
            };
            body.insert("dueDate".to_string(), value);
        }
        let response = self
            .http
            .put(self.url(&format!("/api/tasks/{id}")))
            .bearer_auth(token)
            .json(&Value::Object(body))
            .send()
            .await?;
        Self::expect_ok(response).await?;
        Ok(())
    }

    pub async fn delete_task(&self, token: &str, id: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/api/tasks/{id}")))
            .bearer_auth(token)
            .send()
            .await?;
        Self::expect_ok(response).await?;
        Ok(())
    }
}
