//! Router configuration for the web surface.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{check_nickname, get_servers, AppState};
use super::ws::chat_ws_handler;

/// Create the main router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/get_servers", get(get_servers))
        .route("/check_nickname", get(check_nickname))
        .route("/ws", get(chat_ws_handler))
        .route("/health", get(health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer()),
        )
        .with_state(state)
}

/// Create the CORS layer.
///
/// Clients connect from arbitrary origins (the login page may be served
/// from another host), so any origin is allowed without credentials.
fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(Any)
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
