//! Actions dispatched through the reducer.
//!
//! Each asynchronous operation has three phases (`*Requested`,
//! `*Succeeded`, `*Failed`); the reducer handles all of them
//! synchronously. In-flight requests are not deduplicated: a second
//! `*Requested` simply restarts the loading phase.

use taskdeck_core::models::{Project, Task, TaskStatus, User};
use taskdeck_core::types::{DocId, Timestamp};

/// Top-level action routed to one of the three slices.
#[derive(Debug, Clone)]
pub enum Action {
    Auth(AuthAction),
    Projects(ProjectsAction),
    Tasks(TasksAction),
}

#[derive(Debug, Clone)]
pub enum AuthAction {
    LoginRequested,
    LoginSucceeded(User),
    LoginFailed(String),
    RegisterRequested,
    RegisterSucceeded(User),
    RegisterFailed(String),
    LogoutRequested,
    LogoutSucceeded,
    LogoutFailed(String),
    /// Startup session restoration finished; `None` means no valid session.
    Initialized(Option<User>),
    ClearError,
}

#[derive(Debug, Clone)]
pub enum ProjectsAction {
    FetchRequested,
    FetchSucceeded(Vec<Project>),
    FetchFailed(String),
    CreateRequested,
    CreateSucceeded(Project),
    CreateFailed(String),
    UpdateRequested,
    UpdateSucceeded(Project),
    UpdateFailed(String),
    DeleteRequested,
    DeleteSucceeded(DocId),
    DeleteFailed(String),
    ClearError,
}

/// Fields the caller changed in a task update.
///
/// The server acknowledges task updates without echoing the document, so
/// the store merges the changes it sent into its local copy.
#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub status: Option<TaskStatus>,
    /// `Some(None)` clears the due date; `None` leaves it untouched.
    pub due_date: Option<Option<Timestamp>>,
}

#[derive(Debug, Clone)]
pub enum TasksAction {
    FetchRequested,
    FetchSucceeded(Vec<Task>),
    FetchFailed(String),
    CreateRequested,
    CreateSucceeded(Task),
    CreateFailed(String),
    UpdateRequested,
    UpdateSucceeded { id: DocId, changes: TaskChanges },
    UpdateFailed(String),
    DeleteRequested,
    DeleteSucceeded(DocId),
    DeleteFailed(String),
    /// Drop loaded tasks, e.g. when leaving a project view.
    Clear,
    ClearError,
}

impl From<AuthAction> for Action {
    fn from(action: AuthAction) -> Self {
        Action::Auth(action)
    }
}

impl From<ProjectsAction> for Action {
    fn from(action: ProjectsAction) -> Self {
        Action::Projects(action)
    }
}

impl From<TasksAction> for Action {
    fn from(action: TasksAction) -> Self {
        Action::Tasks(action)
    }
}
