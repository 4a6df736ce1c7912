//! Web API tests for huddle.
//!
//! Integration tests for the HTTP query endpoints.

use std::sync::Arc;

use axum_test::TestServer;
use serde_json::Value;
use tokio::sync::mpsc;

use huddle::chat::{ConnectionHandle, PresenceRegistry};
use huddle::config::ServerEndpoint;
use huddle::web::{create_router, AppState};

/// Create a test server over a fresh registry.
fn create_test_server(servers: Vec<ServerEndpoint>) -> (TestServer, Arc<PresenceRegistry>) {
    let registry = Arc::new(PresenceRegistry::new());
    let state = Arc::new(AppState::new(Arc::clone(&registry), servers));
    let server = TestServer::new(create_router(state)).expect("Failed to create test server");
    (server, registry)
}

fn sample_servers() -> Vec<ServerEndpoint> {
    vec![
        ServerEndpoint {
            name: "本地服务器".to_string(),
            url: "ws://127.0.0.1:5000/ws".to_string(),
        },
        ServerEndpoint {
            name: "Backup".to_string(),
            url: "ws://backup.example.com/ws".to_string(),
        },
    ]
}

#[tokio::test]
async fn test_health_check() {
    let (server, _registry) = create_test_server(Vec::new());

    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_text("OK");
}

#[tokio::test]
async fn test_get_servers_returns_configured_endpoints() {
    let (server, _registry) = create_test_server(sample_servers());

    let response = server.get("/get_servers").await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    let list = body.as_array().expect("expected a JSON array");
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["name"], "本地服务器");
    assert_eq!(list[0]["url"], "ws://127.0.0.1:5000/ws");
    assert_eq!(list[1]["name"], "Backup");
}

#[tokio::test]
async fn test_get_servers_empty_config() {
    let (server, _registry) = create_test_server(Vec::new());

    let response = server.get("/get_servers").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), serde_json::json!([]));
}

#[tokio::test]
async fn test_check_nickname_available() {
    let (server, _registry) = create_test_server(Vec::new());

    let response = server
        .get("/check_nickname")
        .add_query_param("nickname", "Alice")
        .await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["valid"], true);
}

#[tokio::test]
async fn test_check_nickname_tracks_registry() {
    let (server, registry) = create_test_server(Vec::new());

    let (tx, _rx) = mpsc::unbounded_channel();
    registry
        .register("Alice", ConnectionHandle::new(tx))
        .await
        .unwrap();

    let response = server
        .get("/check_nickname")
        .add_query_param("nickname", "Alice")
        .await;
    assert_eq!(response.json::<Value>()["valid"], false);

    registry.unregister("Alice").await;

    let response = server
        .get("/check_nickname")
        .add_query_param("nickname", "Alice")
        .await;
    assert_eq!(response.json::<Value>()["valid"], true);
}

#[tokio::test]
async fn test_check_nickname_missing_param_rejected() {
    let (server, _registry) = create_test_server(Vec::new());

    let response = server.get("/check_nickname").await;
    assert!(response.status_code().is_client_error());
}
