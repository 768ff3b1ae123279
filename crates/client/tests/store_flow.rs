//! End-to-end tests driving the client store against a real server.
//!
//! Each test spawns the full Axum application over an in-memory document
//! store on an ephemeral port and talks to it over loopback HTTP.

use std::sync::Arc;

use taskdeck_api::auth::identity::{IdentityService, JwtIdentity};
use taskdeck_api::auth::jwt::JwtConfig;
use taskdeck_api::config::{ServerConfig, StoreBackend};
use taskdeck_api::router::build_app_router;
use taskdeck_api::state::AppState;
use taskdeck_client::{ApiClient, Store, TaskChanges};
use taskdeck_core::models::TaskStatus;
use taskdeck_store::{DocumentStore, MemoryStore};

/// Spawn the application on an ephemeral port and return its base URL.
async fn spawn_server() -> String {
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store_backend: StoreBackend::Memory,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
    };
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    let identity: Arc<dyn IdentityService> =
        Arc::new(JwtIdentity::new(Arc::clone(&store), config.jwt.clone()));
    let state = AppState {
        store,
        identity,
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind should succeed");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server error");
    });
    format!("http://{addr}")
}

/// A whole session: register, create a project, work a task across the
/// board, then tear everything down.
#[tokio::test]
async fn full_session_flow() {
    let base = spawn_server().await;
    let mut store = Store::new(ApiClient::new(base));

    // Cold start with no persisted token.
    store.initialize(None).await;
    assert!(store.state().auth.initialized);
    assert!(store.state().auth.user.is_none());

    store
        .register("founder@example.com", "test_password_123!", Some("Founder"))
        .await;
    assert_eq!(store.state().auth.error, None);
    let uid = store.state().auth.user.as_ref().expect("signed in").uid.clone();
    assert!(store.token().is_some());

    store.create_project("Launch", "Q1 launch plan").await;
    assert_eq!(store.state().projects.items.len(), 1);
    let project = store.state().projects.items[0].clone();
    assert_eq!(project.user_id, uid);

    store.create_task("Draft brief", &project.id, None).await;
    assert_eq!(store.state().tasks.items.len(), 1);
    let task = store.state().tasks.items[0].clone();
    assert_eq!(task.status, TaskStatus::Todo);
    assert_eq!(task.due_date, None);

    // Drag the card to Done; the local copy moves immediately.
    store.update_task_status(&task.id, TaskStatus::Done).await;
    assert_eq!(store.state().tasks.error, None);
    assert_eq!(store.state().tasks.items[0].status, TaskStatus::Done);

    // A refetch agrees with the merged local state and carries the
    // server's refreshed updatedAt.
    store.fetch_tasks(&project.id).await;
    assert_eq!(store.state().tasks.items.len(), 1);
    assert_eq!(store.state().tasks.items[0].status, TaskStatus::Done);
    assert!(store.state().tasks.items[0].updated_at > task.updated_at);

    // Deleting the project cascades server-side.
    store.delete_project(&project.id).await;
    assert!(store.state().projects.items.is_empty());
    store.fetch_tasks(&project.id).await;
    assert!(store.state().tasks.items.is_empty());
}

/// Setting and clearing a due date round-trips through the server.
#[tokio::test]
async fn due_date_set_and_clear() {
    let base = spawn_server().await;
    let mut store = Store::new(ApiClient::new(base));

    store
        .register("dates@example.com", "test_password_123!", None)
        .await;
    store.create_project("Dated", "deadline work").await;
    let project_id = store.state().projects.items[0].id.clone();

    let due = chrono::Utc::now() + chrono::Duration::days(7);
    store.create_task("Deliver", &project_id, Some(due)).await;
    let task = store.state().tasks.items[0].clone();
    assert!(task.due_date.is_some());

    store
        .update_task(
            &task.id,
            TaskChanges {
                due_date: Some(None),
                ..Default::default()
            },
        )
        .await;
    assert_eq!(store.state().tasks.items[0].due_date, None);

    // The server agrees after a refetch.
    store.fetch_tasks(&project_id).await;
    assert_eq!(store.state().tasks.items[0].due_date, None);
}

/// Operations before sign-in record an error in the targeted slice only.
#[tokio::test]
async fn actions_without_session_record_errors() {
    let base = spawn_server().await;
    let mut store = Store::new(ApiClient::new(base));

    store.fetch_projects().await;
    assert_eq!(
        store.state().projects.error.as_deref(),
        Some("No authentication token")
    );
    assert!(!store.state().projects.loading);
    assert_eq!(store.state().auth.error, None);
    assert_eq!(store.state().tasks.error, None);
}

/// A failed login surfaces the server's message without creating a session.
#[tokio::test]
async fn login_failure_surfaces_server_message() {
    let base = spawn_server().await;
    let mut store = Store::new(ApiClient::new(base));

    store.login("ghost@example.com", "wrong_password").await;
    assert_eq!(
        store.state().auth.error.as_deref(),
        Some("Invalid email or password")
    );
    assert!(store.state().auth.user.is_none());
    assert!(store.token().is_none());
}

/// A token survives a store restart via `initialize`.
#[tokio::test]
async fn session_restoration_from_persisted_token() {
    let base = spawn_server().await;

    let mut first = Store::new(ApiClient::new(base.clone()));
    first
        .register("returning@example.com", "test_password_123!", None)
        .await;
    let token = first.token().expect("token issued").to_string();

    // A brand-new store with the persisted token picks up the session.
    let mut second = Store::new(ApiClient::new(base));
    second.initialize(Some(token)).await;
    assert!(second.state().auth.initialized);
    assert_eq!(
        second.state().auth.user.as_ref().expect("restored").email,
        "returning@example.com"
    );

    // And a garbage token resolves to "no user", not an error.
    let mut third = Store::new(ApiClient::new("http://127.0.0.1:1"));
    third.initialize(Some("stale-token".to_string())).await;
    assert!(third.state().auth.initialized);
    assert!(third.state().auth.user.is_none());
}
