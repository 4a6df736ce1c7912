//! HTTP query handlers for huddle.
//!
//! Read-only projections consumed by the login page: the configured
//! server endpoints and nickname availability.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::chat::PresenceRegistry;
use crate::config::ServerEndpoint;

/// Shared application state for the web surface.
pub struct AppState {
    /// Presence registry backing the chat room.
    pub registry: Arc<PresenceRegistry>,
    /// Configured external chat server endpoints.
    pub servers: Vec<ServerEndpoint>,
}

impl AppState {
    /// Create application state.
    pub fn new(registry: Arc<PresenceRegistry>, servers: Vec<ServerEndpoint>) -> Self {
        Self { registry, servers }
    }
}

/// GET /get_servers
///
/// List the configured external chat server endpoints.
pub async fn get_servers(State(state): State<Arc<AppState>>) -> Json<Vec<ServerEndpoint>> {
    Json(state.servers.clone())
}

/// Query parameters for nickname availability checks.
#[derive(Debug, Deserialize)]
pub struct NicknameQuery {
    /// Nickname to check.
    pub nickname: String,
}

/// Response body for nickname availability checks.
#[derive(Debug, Serialize)]
pub struct NicknameCheck {
    /// Whether the nickname is free to use.
    pub valid: bool,
}

/// GET /check_nickname?nickname={nickname}
///
/// Report whether a nickname is available.
pub async fn check_nickname(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NicknameQuery>,
) -> Json<NicknameCheck> {
    let valid = !state.registry.is_taken(&query.nickname).await;
    Json(NicknameCheck { valid })
}
