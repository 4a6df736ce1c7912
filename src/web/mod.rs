//! Web surface for huddle.
//!
//! Binds the chat core to a concrete transport: a WebSocket endpoint for
//! the session loop plus read-only HTTP query endpoints.

pub mod handlers;
pub mod router;
pub mod server;
pub mod ws;

pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
