//! Client-side state store for the taskdeck API.
//!
//! Mirrors the server's wire models into a single [`Store`] holding three
//! independent slices (auth, projects, tasks). All state transitions go
//! through the pure [`reducer::reduce`] function; asynchronous operations
//! wrap HTTP calls in requested/succeeded/failed action phases.

pub mod action;
pub mod api;
pub mod reducer;
pub mod state;
pub mod store;

pub use action::{Action, AuthAction, ProjectsAction, TaskChanges, TasksAction};
pub use api::{ApiClient, ClientError, Session};
pub use state::{AuthSlice, ProjectsSlice, StoreState, TasksSlice};
pub use store::Store;
