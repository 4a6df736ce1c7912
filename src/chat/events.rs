//! Wire event types for chat communication.

use serde::{Deserialize, Serialize};

/// Kind of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Regular chat message.
    Normal,
    /// Stubbed AI assistant reply.
    AiResponse,
    /// Embedded-media payload built from a movie-link command.
    MovieLink,
    /// Mention of another online user.
    Mention,
    /// System notice.
    System,
}

impl MessageKind {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Normal => "normal",
            MessageKind::AiResponse => "ai_response",
            MessageKind::MovieLink => "movie_link",
            MessageKind::Mention => "mention",
            MessageKind::System => "system",
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Events sent from client to server.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Announce a nickname and enter the room.
    Join {
        /// Requested nickname.
        nickname: String,
    },
    /// Send a chat message to the room.
    SendMessage {
        /// Sender's nickname (informational; the registered identity is
        /// authoritative).
        nickname: String,
        /// Message body.
        message: String,
    },
    /// Leave the room.
    Leave {
        /// Leaving nickname (informational).
        nickname: String,
    },
}

/// Events sent from server to client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Join succeeded (unicast to the joiner).
    JoinSuccess {
        /// Welcome message.
        message: String,
        /// Current online nicknames, joiner included.
        users: Vec<String>,
    },
    /// A user joined the room.
    UserJoined {
        /// Joining nickname.
        nickname: String,
        /// Current online nicknames.
        users: Vec<String>,
    },
    /// A user left the room.
    UserLeft {
        /// Leaving nickname.
        nickname: String,
        /// Remaining online nicknames.
        users: Vec<String>,
    },
    /// A chat message, raw or command-produced.
    ReceiveMessage {
        /// Sender's nickname (the system label for AI replies).
        nickname: String,
        /// Message body.
        message: String,
        /// Message kind.
        #[serde(rename = "type")]
        kind: MessageKind,
        /// ISO 8601 timestamp.
        timestamp: String,
    },
    /// Error reply (unicast to the requester).
    Error {
        /// Error code.
        code: String,
        /// Error message.
        message: String,
    },
}

impl ServerEvent {
    /// Create an error event.
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a chat message event stamped with the current time.
    pub fn message(
        nickname: impl Into<String>,
        message: impl Into<String>,
        kind: MessageKind,
    ) -> Self {
        Self::ReceiveMessage {
            nickname: nickname.into(),
            message: message.into(),
            kind,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_kind_as_str() {
        assert_eq!(MessageKind::Normal.as_str(), "normal");
        assert_eq!(MessageKind::AiResponse.as_str(), "ai_response");
        assert_eq!(MessageKind::MovieLink.as_str(), "movie_link");
        assert_eq!(MessageKind::Mention.as_str(), "mention");
        assert_eq!(MessageKind::System.as_str(), "system");
    }

    #[test]
    fn test_message_kind_serialize() {
        let json = serde_json::to_string(&MessageKind::AiResponse).unwrap();
        assert_eq!(json, "\"ai_response\"");
    }

    #[test]
    fn test_client_event_join_deserialize() {
        let json = r#"{"event": "join", "nickname": "Alice"}"#;
        let event: ClientEvent = serde_json::from_str(json).unwrap();
        match event {
            ClientEvent::Join { nickname } => assert_eq!(nickname, "Alice"),
            _ => panic!("Expected Join event"),
        }
    }

    #[test]
    fn test_client_event_send_message_deserialize() {
        let json = r#"{"event": "send_message", "nickname": "Alice", "message": "hello"}"#;
        let event: ClientEvent = serde_json::from_str(json).unwrap();
        match event {
            ClientEvent::SendMessage { nickname, message } => {
                assert_eq!(nickname, "Alice");
                assert_eq!(message, "hello");
            }
            _ => panic!("Expected SendMessage event"),
        }
    }

    #[test]
    fn test_client_event_leave_deserialize() {
        let json = r#"{"event": "leave", "nickname": "Alice"}"#;
        let event: ClientEvent = serde_json::from_str(json).unwrap();
        assert!(matches!(event, ClientEvent::Leave { .. }));
    }

    #[test]
    fn test_client_event_unknown_rejected() {
        let json = r#"{"event": "shutdown"}"#;
        let result = serde_json::from_str::<ClientEvent>(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_server_event_join_success_serialize() {
        let event = ServerEvent::JoinSuccess {
            message: "成功加入聊天室！".to_string(),
            users: vec!["Alice".to_string()],
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"event\":\"join_success\""));
        assert!(json.contains("成功加入聊天室"));
        assert!(json.contains("\"users\":[\"Alice\"]"));
    }

    #[test]
    fn test_server_event_receive_message_serialize() {
        let event = ServerEvent::message("Alice", "hello", MessageKind::Normal);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"event\":\"receive_message\""));
        assert!(json.contains("\"nickname\":\"Alice\""));
        assert!(json.contains("\"message\":\"hello\""));
        assert!(json.contains("\"type\":\"normal\""));
        assert!(json.contains("\"timestamp\""));
    }

    #[test]
    fn test_server_event_user_left_serialize() {
        let event = ServerEvent::UserLeft {
            nickname: "Alice".to_string(),
            users: vec![],
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"event\":\"user_left\""));
        assert!(json.contains("\"users\":[]"));
    }

    #[test]
    fn test_server_event_error_serialize() {
        let event = ServerEvent::error("nickname_taken", "Nickname is already taken");
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"event\":\"error\""));
        assert!(json.contains("\"code\":\"nickname_taken\""));
    }
}
