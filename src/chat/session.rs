//! Per-connection session state machine for huddle.
//!
//! Orchestrates the connect/join/message/leave/disconnect lifecycle,
//! consulting the presence registry, running the command processor and
//! fanning results out through the room broadcaster.

use std::sync::Arc;

use super::command::{self, SYSTEM_SENDER};
use super::events::{ClientEvent, MessageKind, ServerEvent};
use super::registry::{ConnectionHandle, ConnectionId, PresenceRegistry};
use super::room::RoomBroadcaster;

/// Welcome message sent to a successful joiner.
const JOIN_SUCCESS_MESSAGE: &str = "成功加入聊天室！";

/// Lifecycle state of one connection.
///
/// `Anonymous -> Joined -> Closed`, terminal; there is no way back to
/// `Anonymous` once joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Connected, no nickname announced yet.
    Anonymous,
    /// Registered in the room under the given nickname.
    Joined(String),
    /// Left or disconnected.
    Closed,
}

/// State machine for one client connection.
pub struct Session {
    handle: ConnectionHandle,
    registry: Arc<PresenceRegistry>,
    broadcaster: RoomBroadcaster,
    state: SessionState,
}

impl Session {
    /// Create a session for a freshly accepted connection.
    ///
    /// No registry mutation happens until the client joins.
    pub fn new(handle: ConnectionHandle, registry: Arc<PresenceRegistry>) -> Self {
        let broadcaster = RoomBroadcaster::new(Arc::clone(&registry));
        Self {
            handle,
            registry,
            broadcaster,
            state: SessionState::Anonymous,
        }
    }

    /// Get the connection identifier.
    pub fn id(&self) -> ConnectionId {
        self.handle.id()
    }

    /// Get the current lifecycle state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Get the registered nickname, if joined.
    pub fn nickname(&self) -> Option<&str> {
        match &self.state {
            SessionState::Joined(nickname) => Some(nickname),
            _ => None,
        }
    }

    /// Dispatch one inbound client event.
    pub async fn handle_event(&mut self, event: ClientEvent) {
        match event {
            ClientEvent::Join { nickname } => self.join(nickname).await,
            ClientEvent::SendMessage { message, .. } => self.message(message).await,
            ClientEvent::Leave { .. } => self.leave().await,
        }
    }

    /// Announce a nickname and enter the room.
    ///
    /// Valid only while anonymous. A registry conflict is reported to this
    /// connection alone, never broadcast, and leaves the state unchanged.
    pub async fn join(&mut self, nickname: String) {
        if self.state != SessionState::Anonymous {
            self.broadcaster.unicast(
                &self.handle,
                ServerEvent::error("already_joined", "Session has already joined the room"),
            );
            return;
        }

        if nickname.trim().is_empty() {
            self.broadcaster.unicast(
                &self.handle,
                ServerEvent::error("invalid_nickname", "Nickname must not be empty"),
            );
            return;
        }

        match self.registry.register(&nickname, self.handle.clone()).await {
            Ok(()) => {
                tracing::info!("{nickname} joined the chat");
                self.state = SessionState::Joined(nickname.clone());

                let users = self.registry.nicknames().await;
                self.broadcaster.unicast(
                    &self.handle,
                    ServerEvent::JoinSuccess {
                        message: JOIN_SUCCESS_MESSAGE.to_string(),
                        users: users.clone(),
                    },
                );
                self.broadcaster
                    .broadcast(
                        ServerEvent::UserJoined { nickname, users },
                        Some(self.handle.id()),
                    )
                    .await;
            }
            Err(e) => {
                tracing::debug!("join rejected: {e}");
                self.broadcaster
                    .unicast(&self.handle, ServerEvent::error("nickname_taken", e.to_string()));
            }
        }
    }

    /// Broadcast a chat message, then any command result it produces.
    ///
    /// Valid only while joined. The raw message always goes out first, to
    /// the whole room including the sender; a non-normal command result
    /// follows as a second event, attributed to the system label for AI
    /// replies and to the sender otherwise.
    pub async fn message(&mut self, body: String) {
        let nickname = match &self.state {
            SessionState::Joined(nickname) => nickname.clone(),
            _ => {
                self.broadcaster.unicast(
                    &self.handle,
                    ServerEvent::error("not_joined", "Join the room before sending messages"),
                );
                return;
            }
        };

        self.broadcaster
            .broadcast(
                ServerEvent::message(&nickname, &body, MessageKind::Normal),
                None,
            )
            .await;

        let online = self.registry.nicknames().await;
        let result = command::process(&body, &nickname, &online);
        if result.kind != MessageKind::Normal {
            let sender = if result.kind == MessageKind::AiResponse {
                SYSTEM_SENDER.to_string()
            } else {
                nickname
            };
            self.broadcaster
                .broadcast(ServerEvent::message(sender, result.body, result.kind), None)
                .await;
        }
    }

    /// Leave the room explicitly.
    ///
    /// Valid only while joined; terminal.
    pub async fn leave(&mut self) {
        let nickname = match &self.state {
            SessionState::Joined(nickname) => nickname.clone(),
            _ => {
                self.broadcaster.unicast(
                    &self.handle,
                    ServerEvent::error("not_joined", "Session is not in the room"),
                );
                return;
            }
        };

        self.registry.unregister(&nickname).await;
        self.announce_departure(nickname).await;
        self.state = SessionState::Closed;
    }

    /// Handle the connection dropping, with or without a prior leave.
    ///
    /// Valid from any state; terminal. If a nickname was registered the
    /// departure broadcast is identical to an explicit leave.
    pub async fn disconnect(&mut self) {
        if let Some(nickname) = self.registry.unregister_by_id(self.handle.id()).await {
            self.announce_departure(nickname).await;
        }
        self.state = SessionState::Closed;
    }

    async fn announce_departure(&self, nickname: String) {
        tracing::info!("{nickname} left the chat");
        let users = self.registry.nicknames().await;
        self.broadcaster
            .broadcast(ServerEvent::UserLeft { nickname, users }, None)
            .await;
    }
}
