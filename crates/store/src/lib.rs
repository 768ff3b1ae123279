//! Document-store abstraction and backends.
//!
//! The rest of the workspace talks to storage exclusively through the
//! [`DocumentStore`] trait: collection-scoped `find`/`get`/`add`/`update`/
//! `delete` plus a grouped `batch_delete`. Two backends are provided:
//!
//! - [`memory::MemoryStore`] -- process-local maps, used by tests and as
//!   the default development backend.
//! - [`postgres::PgStore`] -- a single JSONB table in Postgres.
//!
//! Repositories in [`repositories`] layer typed CRUD for the `projects`,
//! `tasks`, and `users` collections on top of the trait.

pub mod document;
pub mod memory;
pub mod postgres;
pub mod repositories;

pub use document::{Document, DocumentStore, Filter, StoreError};
pub use memory::MemoryStore;
pub use postgres::PgStore;
