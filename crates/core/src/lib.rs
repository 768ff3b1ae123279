//! Shared domain types for the taskdeck workspace.
//!
//! Holds the error taxonomy, id/timestamp aliases, and the wire models
//! (`Project`, `Task`, `User`) that the server and client both speak.

pub mod error;
pub mod models;
pub mod types;
