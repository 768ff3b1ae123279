//! State slices held by the client store.

use serde::Serialize;
use taskdeck_core::models::{Project, Task, User};

/// Authentication slice.
///
/// `initialized` distinguishes "auth status not yet determined" from
/// "determined, no user": consumers must not treat `user == None` as
/// authoritative until it is true.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuthSlice {
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
    pub initialized: bool,
}

/// Projects slice: the caller's project list.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectsSlice {
    pub items: Vec<Project>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Tasks slice: the tasks of the currently viewed project.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TasksSlice {
    pub items: Vec<Task>,
    pub loading: bool,
    pub error: Option<String>,
}

/// The whole client state. Slices are independent: an error in one never
/// touches the others.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreState {
    pub auth: AuthSlice,
    pub projects: ProjectsSlice,
    pub tasks: TasksSlice,
}
