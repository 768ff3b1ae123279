use std::sync::Arc;

use taskdeck_store::DocumentStore;

use crate::auth::identity::IdentityService;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (everything is behind `Arc`). Both external
/// collaborators sit behind traits so tests can swap backends freely.
#[derive(Clone)]
pub struct AppState {
    /// Document store holding the `projects`, `tasks`, and `users` collections.
    pub store: Arc<dyn DocumentStore>,
    /// Identity service that issues and verifies bearer tokens.
    pub identity: Arc<dyn IdentityService>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
