//! Chat core for huddle.
//!
//! This module provides the single-room chat relay:
//! - Presence registry (nickname to connection mapping)
//! - Room broadcaster (best-effort fan-out)
//! - Command processor (@-commands: AI stub, movie link, mention)
//! - Per-connection session state machine

pub mod command;
pub mod events;
pub mod registry;
pub mod room;
pub mod session;

pub use command::{process, CommandResult, AI_TRIGGER, MOVIE_TRIGGER, SYSTEM_SENDER};
pub use events::{ClientEvent, MessageKind, ServerEvent};
pub use registry::{ConnectionHandle, ConnectionId, NicknameTaken, PresenceRegistry};
pub use room::RoomBroadcaster;
pub use session::{Session, SessionState};
