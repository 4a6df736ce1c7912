//! Huddle — a single-room real-time chat relay.
//!
//! Clients open a WebSocket, announce a nickname and exchange broadcast
//! messages plus a small set of @-commands (AI stub, movie link, mention).

pub mod chat;
pub mod config;
pub mod error;
pub mod logging;
pub mod web;

pub use chat::{
    ClientEvent, ConnectionHandle, ConnectionId, MessageKind, NicknameTaken, PresenceRegistry,
    RoomBroadcaster, ServerEvent, Session, SessionState,
};
pub use config::Config;
pub use error::{HuddleError, Result};
pub use web::WebServer;
