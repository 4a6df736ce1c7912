//! Presence registry for huddle.
//!
//! Single source of truth for who is online. Room membership is a derived
//! view over the registry, so there is no separate membership state to
//! desync.

use std::collections::HashMap;

use thiserror::Error;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use super::events::ServerEvent;

/// Opaque per-connection identifier.
pub type ConnectionId = Uuid;

/// Error sending an event to a connection whose receiver is gone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("connection {0} is no longer receiving")]
pub struct SendError(pub ConnectionId);

/// Delivery endpoint for one connection.
///
/// Cloning is cheap; the channel sender is shared with the connection's
/// writer task.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    /// Connection identifier.
    id: ConnectionId,
    /// Outbound event channel.
    sender: mpsc::UnboundedSender<ServerEvent>,
}

impl ConnectionHandle {
    /// Create a handle with a fresh identifier.
    pub fn new(sender: mpsc::UnboundedSender<ServerEvent>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
        }
    }

    /// Get the connection identifier.
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Queue an event for delivery to this connection.
    ///
    /// Fails only when the connection's receiver has been dropped.
    pub fn send(&self, event: ServerEvent) -> Result<(), SendError> {
        self.sender.send(event).map_err(|_| SendError(self.id))
    }
}

/// Error registering a nickname that is already present.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("nickname {0:?} is already taken")]
pub struct NicknameTaken(pub String);

/// Mapping from nickname to connection handle.
///
/// All mutating and enumerating operations go through one `RwLock`, so
/// register/unregister/list are linearizable with respect to one another.
pub struct PresenceRegistry {
    users: RwLock<HashMap<String, ConnectionHandle>>,
}

impl PresenceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }

    /// Register a nickname atomically.
    ///
    /// Fails if the nickname is already present; two simultaneous calls
    /// for the same nickname cannot both succeed.
    pub async fn register(
        &self,
        nickname: &str,
        handle: ConnectionHandle,
    ) -> Result<(), NicknameTaken> {
        let mut users = self.users.write().await;
        if users.contains_key(nickname) {
            return Err(NicknameTaken(nickname.to_string()));
        }
        users.insert(nickname.to_string(), handle);
        Ok(())
    }

    /// Remove a nickname, returning its prior handle.
    pub async fn unregister(&self, nickname: &str) -> Option<ConnectionHandle> {
        self.users.write().await.remove(nickname)
    }

    /// Remove whatever nickname is bound to the given connection.
    ///
    /// Used when a connection drops without an explicit leave: the handle
    /// is known, the nickname is not.
    pub async fn unregister_by_id(&self, id: ConnectionId) -> Option<String> {
        let mut users = self.users.write().await;
        let nickname = users
            .iter()
            .find(|(_, handle)| handle.id == id)
            .map(|(nickname, _)| nickname.clone())?;
        users.remove(&nickname);
        Some(nickname)
    }

    /// Check if a nickname is currently registered.
    pub async fn is_taken(&self, nickname: &str) -> bool {
        self.users.read().await.contains_key(nickname)
    }

    /// Snapshot of the online nicknames.
    ///
    /// Order is unspecified; clients only use this to populate lists.
    pub async fn nicknames(&self) -> Vec<String> {
        self.users.read().await.keys().cloned().collect()
    }

    /// Consistent snapshot of all connection handles, for broadcasting.
    pub async fn handles(&self) -> Vec<ConnectionHandle> {
        self.users.read().await.values().cloned().collect()
    }

    /// Number of registered users.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Whether the room is empty.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl Default for PresenceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
