//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&dyn DocumentStore` as the first argument. Repositories
//! own the collection names, the camelCase document shape, and the
//! client-side ordering (the store itself returns unordered results).

pub mod project_repo;
pub mod task_repo;
pub mod user_repo;

pub use project_repo::{NewProject, ProjectPatch, ProjectRepo};
pub use task_repo::{NewTask, TaskPatch, TaskRepo};
pub use user_repo::{NewUser, UserRecord, UserRepo};
