//! Gateway event envelope
//!
//! Every frame is `{"event": "<name>", "data": <payload>}`; events without
//! a payload omit `data` entirely.

use serde::{Deserialize, Serialize};

use super::payloads::{
    ErrorPayload, JoinPayload, MessagePayload, PresencePayload, ReactPayload, ReactionAddedPayload,
    RoomJoinedPayload, SendPayload,
};

/// Events a client may send to the gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Switch to another room
    Join(JoinPayload),
    /// Send a chat message to the current room
    Send(SendPayload),
    /// React to a message with an emoji
    React(ReactPayload),
    /// The client started composing a message
    TypingStart,
    /// The client stopped composing (debounced client-side)
    TypingStop,
    /// The profile changed out of band; refresh the cached identity
    ProfileRefresh,
}

impl ClientEvent {
    /// Event name as it appears on the wire
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Join(_) => "join",
            Self::Send(_) => "send",
            Self::React(_) => "react",
            Self::TypingStart => "typing-start",
            Self::TypingStop => "typing-stop",
            Self::ProfileRefresh => "profile-refresh",
        }
    }

    /// Deserialize from a JSON text frame
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Events the gateway pushes to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Room metadata, sent to the joining connection
    Joined(RoomJoinedPayload),
    /// Bounded message backfill, sent right after `joined`
    History(Vec<MessagePayload>),
    /// A message admitted to the room
    NewMessage(MessagePayload),
    /// A reaction admitted on a message in the room
    ReactionAdded(ReactionAddedPayload),
    /// The room's full typing set
    Typing(Vec<String>),
    /// Another member joined the room
    UserJoined(PresencePayload),
    /// A member left the room
    UserLeft(PresencePayload),
    /// Operation failure scoped to the receiving connection
    Error(ErrorPayload),
}

impl ServerEvent {
    /// Create an `error` event
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(ErrorPayload {
            message: message.into(),
        })
    }

    /// Create a `typing` event from a name set snapshot
    #[must_use]
    pub fn typing(names: Vec<String>) -> Self {
        Self::Typing(names)
    }

    /// Create a `user-joined` event
    pub fn user_joined(display_name: impl Into<String>) -> Self {
        Self::UserJoined(PresencePayload {
            display_name: display_name.into(),
        })
    }

    /// Create a `user-left` event
    pub fn user_left(display_name: impl Into<String>) -> Self {
        Self::UserLeft(PresencePayload {
            display_name: display_name.into(),
        })
    }

    /// Event name as it appears on the wire
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Joined(_) => "joined",
            Self::History(_) => "history",
            Self::NewMessage(_) => "new-message",
            Self::ReactionAdded(_) => "reaction-added",
            Self::Typing(_) => "typing",
            Self::UserJoined(_) => "user-joined",
            Self::UserLeft(_) => "user-left",
            Self::Error(_) => "error",
        }
    }

    /// Serialize to a JSON text frame
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
