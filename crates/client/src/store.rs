//! The client store: state plus the asynchronous dispatcher.

use crate::action::{Action, AuthAction, ProjectsAction, TaskChanges, TasksAction};
use crate::api::{ApiClient, ClientError};
use crate::reducer::reduce;
use crate::state::StoreState;

use taskdeck_core::models::TaskStatus;
use taskdeck_core::types::Timestamp;

/// A per-session client store.
///
/// Owns the state, the HTTP client, and the bearer token. Construct one
/// per application session (or per test); there is no global instance.
/// Every asynchronous method dispatches a `*Requested` action before the
/// HTTP call and a `*Succeeded`/`*Failed` action after it, so the state
/// always reflects in-flight work.
pub struct Store {
    state: StoreState,
    api: ApiClient,
    token: Option<String>,
}

impl Store {
    pub fn new(api: ApiClient) -> Self {
        Self {
            state: StoreState::default(),
            api,
            token: None,
        }
    }

    /// Read-only view of the current state.
    pub fn state(&self) -> &StoreState {
        &self.state
    }

    /// Bearer token for the current session, if any. Callers persist this
    /// and feed it back through [`Store::initialize`] on the next start.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Apply an action synchronously.
    pub fn dispatch(&mut self, action: impl Into<Action>) {
        reduce(&mut self.state, action.into());
    }

    fn require_token(&self) -> Result<String, ClientError> {
        self.token.clone().ok_or(ClientError::MissingToken)
    }

    // --- auth --------------------------------------------------------------

    /// Restore a session from a persisted token, then mark auth
    /// initialized. A missing or rejected token resolves to "no user"
    /// rather than an error.
    pub async fn initialize(&mut self, token: Option<String>) {
        let user = match token {
            Some(token) => match self.api.me(&token).await {
                Ok(user) => {
                    self.token = Some(token);
                    Some(user)
                }
                Err(e) => {
                    tracing::debug!(error = %e, "stored token rejected");
                    None
                }
            },
            None => None,
        };
        self.dispatch(AuthAction::Initialized(user));
    }

    pub async fn register(&mut self, email: &str, password: &str, display_name: Option<&str>) {
        self.dispatch(AuthAction::RegisterRequested);
        match self.api.register(email, password, display_name).await {
            Ok(session) => {
                self.token = Some(session.token);
                self.dispatch(AuthAction::RegisterSucceeded(session.user));
            }
            Err(e) => self.dispatch(AuthAction::RegisterFailed(e.to_string())),
        }
    }

    pub async fn login(&mut self, email: &str, password: &str) {
        self.dispatch(AuthAction::LoginRequested);
        match self.api.login(email, password).await {
            Ok(session) => {
                self.token = Some(session.token);
                self.dispatch(AuthAction::LoginSucceeded(session.user));
            }
            Err(e) => self.dispatch(AuthAction::LoginFailed(e.to_string())),
        }
    }

    pub async fn logout(&mut self) {
        self.dispatch(AuthAction::LogoutRequested);
        let Some(token) = self.token.clone() else {
            // No session; nothing to revoke server-side.
            self.dispatch(AuthAction::LogoutSucceeded);
            return;
        };
        match self.api.logout(&token).await {
            Ok(()) => {
                self.token = None;
                self.dispatch(AuthAction::LogoutSucceeded);
            }
            Err(e) => self.dispatch(AuthAction::LogoutFailed(e.to_string())),
        }
    }

    // --- projects ----------------------------------------------------------

    pub async fn fetch_projects(&mut self) {
        self.dispatch(ProjectsAction::FetchRequested);
        let result = match self.require_token() {
            Ok(token) => self.api.list_projects(&token).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(projects) => self.dispatch(ProjectsAction::FetchSucceeded(projects)),
            Err(e) => self.dispatch(ProjectsAction::FetchFailed(e.to_string())),
        }
    }

    pub async fn create_project(&mut self, name: &str, description: &str) {
        self.dispatch(ProjectsAction::CreateRequested);
        let result = match self.require_token() {
            Ok(token) => self.api.create_project(&token, name, description).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(project) => self.dispatch(ProjectsAction::CreateSucceeded(project)),
            Err(e) => self.dispatch(ProjectsAction::CreateFailed(e.to_string())),
        }
    }

    pub async fn update_project(&mut self, id: &str, name: &str, description: &str) {
        self.dispatch(ProjectsAction::UpdateRequested);
        let result = match self.require_token() {
            Ok(token) => self.api.update_project(&token, id, name, description).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(project) => self.dispatch(ProjectsAction::UpdateSucceeded(project)),
            Err(e) => self.dispatch(ProjectsAction::UpdateFailed(e.to_string())),
        }
    }

    pub async fn delete_project(&mut self, id: &str) {
        self.dispatch(ProjectsAction::DeleteRequested);
        let result = match self.require_token() {
            Ok(token) => self.api.delete_project(&token, id).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => self.dispatch(ProjectsAction::DeleteSucceeded(id.to_string())),
            Err(e) => self.dispatch(ProjectsAction::DeleteFailed(e.to_string())),
        }
    }

    // --- tasks -------------------------------------------------------------

    pub async fn fetch_tasks(&mut self, project_id: &str) {
        self.dispatch(TasksAction::FetchRequested);
        let result = match self.require_token() {
            Ok(token) => self.api.list_tasks(&token, project_id).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(tasks) => self.dispatch(TasksAction::FetchSucceeded(tasks)),
            Err(e) => self.dispatch(TasksAction::FetchFailed(e.to_string())),
        }
    }

    pub async fn create_task(&mut self, title: &str, project_id: &str, due_date: Option<Timestamp>) {
        self.dispatch(TasksAction::CreateRequested);
        let result = match self.require_token() {
            Ok(token) => self.api.create_task(&token, title, project_id, due_date).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(task) => self.dispatch(TasksAction::CreateSucceeded(task)),
            Err(e) => self.dispatch(TasksAction::CreateFailed(e.to_string())),
        }
    }

    /// Send a partial update, then merge the same changes into the local
    /// copy on success.
    pub async fn update_task(&mut self, id: &str, changes: TaskChanges) {
        self.dispatch(TasksAction::UpdateRequested);
        let result = match self.require_token() {
            Ok(token) => self.api.update_task(&token, id, &changes).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => self.dispatch(TasksAction::UpdateSucceeded {
                id: id.to_string(),
                changes,
            }),
            Err(e) => self.dispatch(TasksAction::UpdateFailed(e.to_string())),
        }
    }

    /// Convenience wrapper for the common drag-across-the-board case.
    pub async fn update_task_status(&mut self, id: &str, status: TaskStatus) {
        self.update_task(
            id,
            TaskChanges {
                status: Some(status),
                ..Default::default()
            },
        )
        .await;
    }

    pub async fn delete_task(&mut self, id: &str) {
        self.dispatch(TasksAction::DeleteRequested);
        let result = match self.require_token() {
            Ok(token) => self.api.delete_task(&token, id).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => self.dispatch(TasksAction::DeleteSucceeded(id.to_string())),
            Err(e) => self.dispatch(TasksAction::DeleteFailed(e.to_string())),
        }
    }

    /// Drop loaded tasks, e.g. when leaving a project view.
    pub fn clear_tasks(&mut self) {
        self.dispatch(TasksAction::Clear);
    }
}
