//! Room broadcaster for huddle.
//!
//! Fans an event out to every currently-registered connection. Delivery is
//! fire-and-forget per recipient: one stale connection never aborts
//! delivery to the rest.

use std::sync::Arc;

use super::events::ServerEvent;
use super::registry::{ConnectionHandle, ConnectionId, PresenceRegistry};

/// Delivers events to the room's current membership.
///
/// Membership is whatever the presence registry holds at call time; the
/// recipient set for one broadcast is a consistent snapshot taken under
/// the registry's read lock and delivered after releasing it, so sends
/// never block joins.
#[derive(Clone)]
pub struct RoomBroadcaster {
    registry: Arc<PresenceRegistry>,
}

impl RoomBroadcaster {
    /// Create a broadcaster over the given registry.
    pub fn new(registry: Arc<PresenceRegistry>) -> Self {
        Self { registry }
    }

    /// Deliver an event to every registered connection.
    ///
    /// When `exclude` is given, that connection is skipped. A recipient
    /// whose channel is closed is logged and skipped.
    pub async fn broadcast(&self, event: ServerEvent, exclude: Option<ConnectionId>) {
        let recipients = self.registry.handles().await;

        for handle in recipients {
            if Some(handle.id()) == exclude {
                continue;
            }
            if let Err(e) = handle.send(event.clone()) {
                tracing::debug!("skipping stale connection during broadcast: {e}");
            }
        }
    }

    /// Deliver an event to a single connection.
    ///
    /// Used for caller-only replies such as join confirmations and errors.
    pub fn unicast(&self, handle: &ConnectionHandle, event: ServerEvent) {
        if let Err(e) = handle.send(event) {
            tracing::debug!("dropping unicast to stale connection: {e}");
        }
    }
}
