//! Wire models shared by the API server and the client store.
//!
//! All JSON field names are camelCase to match the stored document shape.

pub mod project;
pub mod task;
pub mod user;

pub use project::Project;
pub use task::{Task, TaskStatus};
pub use user::User;
