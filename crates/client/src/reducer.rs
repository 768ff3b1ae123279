//! Pure state reducers.
//!
//! [`reduce`] is the only way state changes. It is synchronous and
//! performs no I/O, so tests can drive arbitrary action sequences
//! without a server.

use crate::action::{Action, AuthAction, ProjectsAction, TasksAction};
use crate::state::{AuthSlice, ProjectsSlice, StoreState, TasksSlice};

/// Apply an action to the state, mutating only the targeted slice.
pub fn reduce(state: &mut StoreState, action: Action) {
    match action {
        Action::Auth(action) => reduce_auth(&mut state.auth, action),
        Action::Projects(action) => reduce_projects(&mut state.projects, action),
        Action::Tasks(action) => reduce_tasks(&mut state.tasks, action),
    }
}

fn reduce_auth(slice: &mut AuthSlice, action: AuthAction) {
    use AuthAction::*;
    match action {
        LoginRequested | RegisterRequested | LogoutRequested => {
            slice.loading = true;
            slice.error = None;
        }
        LoginSucceeded(user) | RegisterSucceeded(user) => {
            slice.loading = false;
            slice.user = Some(user);
            slice.error = None;
        }
        LogoutSucceeded => {
            slice.loading = false;
            slice.user = None;
        }
        LoginFailed(msg) | RegisterFailed(msg) | LogoutFailed(msg) => {
            slice.loading = false;
            slice.error = Some(msg);
        }
        Initialized(user) => {
            slice.user = user;
            slice.initialized = true;
        }
        ClearError => slice.error = None,
    }
}

fn reduce_projects(slice: &mut ProjectsSlice, action: ProjectsAction) {
    use ProjectsAction::*;
    match action {
        FetchRequested | CreateRequested | UpdateRequested | DeleteRequested => {
            slice.loading = true;
            slice.error = None;
        }
        FetchSucceeded(items) => {
            slice.loading = false;
            slice.items = items;
        }
        CreateSucceeded(project) => {
            slice.loading = false;
            slice.items.push(project);
        }
        UpdateSucceeded(project) => {
            slice.loading = false;
            // An unknown id is a silent no-op.
            if let Some(existing) = slice.items.iter_mut().find(|p| p.id == project.id) {
                *existing = project;
            }
        }
        DeleteSucceeded(id) => {
            slice.loading = false;
            slice.items.retain(|p| p.id != id);
        }
        FetchFailed(msg) | CreateFailed(msg) | UpdateFailed(msg) | DeleteFailed(msg) => {
            slice.loading = false;
            slice.error = Some(msg);
        }
        ClearError => slice.error = None,
    }
}

fn reduce_tasks(slice: &mut TasksSlice, action: TasksAction) {
    use TasksAction::*;
    match action {
        FetchRequested | CreateRequested | UpdateRequested | DeleteRequested => {
            slice.loading = true;
            slice.error = None;
        }
        FetchSucceeded(items) => {
            slice.loading = false;
            slice.items = items;
        }
        CreateSucceeded(task) => {
            slice.loading = false;
            slice.items.push(task);
        }
        UpdateSucceeded { id, changes } => {
            slice.loading = false;
            // Merge only the fields the caller sent; `updatedAt` stays
            // stale until the next fetch brings the server's value.
            if let Some(task) = slice.items.iter_mut().find(|t| t.id == id) {
                if let Some(title) = changes.title {
                    task.title = title;
                }
                if let Some(status) = changes.status {
                    task.status = status;
                }
                if let Some(due_date) = changes.due_date {
                    task.due_date = due_date;
                }
            }
        }
        DeleteSucceeded(id) => {
            slice.loading = false;
            slice.items.retain(|t| t.id != id);
        }
        Clear => {
            slice.items.clear();
            slice.error = None;
        }
        FetchFailed(msg) | CreateFailed(msg) | UpdateFailed(msg) | DeleteFailed(msg) => {
            slice.loading = false;
            slice.error = Some(msg);
        }
        ClearError => slice.error = None,
    }
}
