//! WebSocket handler binding the chat core to the wire.
//!
//! One socket maps to one session task; inbound frames become client
//! events, and the session's outbound channel is drained back into the
//! socket.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::chat::{ClientEvent, ConnectionHandle, ServerEvent, Session};

use super::handlers::AppState;

/// WebSocket chat handler.
///
/// GET /ws
pub async fn chat_ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Drive one WebSocket connection through its session lifecycle.
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel();
    let handle = ConnectionHandle::new(outbound_tx.clone());
    let mut session = Session::new(handle, Arc::clone(&state.registry));

    tracing::debug!("client connected: {}", session.id());

    let (mut ws_sender, mut ws_receiver) = socket.split();

    loop {
        tokio::select! {
            // Inbound frames from the client
            Some(frame) = ws_receiver.next() => {
                match frame {
                    Ok(Message::Text(text)) => {
                        match serde_json::from_str::<ClientEvent>(&text) {
                            Ok(event) => session.handle_event(event).await,
                            Err(e) => {
                                tracing::debug!("failed to parse client event: {e}");
                                let _ = outbound_tx.send(ServerEvent::error(
                                    "invalid_message",
                                    "Invalid message format",
                                ));
                            }
                        }
                    }
                    Ok(Message::Close(_)) => {
                        tracing::debug!("client closed: {}", session.id());
                        break;
                    }
                    Ok(Message::Ping(data)) => {
                        let _ = ws_sender.send(Message::Pong(data)).await;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::debug!("websocket error on {}: {e}", session.id());
                        break;
                    }
                }
            }

            // Outbound events queued for this connection
            Some(event) = outbound_rx.recv() => {
                match serde_json::to_string(&event) {
                    Ok(json) => {
                        if ws_sender.send(Message::Text(json.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => tracing::debug!("failed to serialize server event: {e}"),
                }
            }

            else => break,
        }
    }

    // Treat any exit as a disconnect; the session ignores it when a leave
    // already ran.
    session.disconnect().await;
    tracing::debug!("client disconnected: {}", session.id());
}
