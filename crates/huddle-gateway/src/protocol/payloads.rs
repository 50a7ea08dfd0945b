//! Event payload definitions
//!
//! Structures carried in the `data` field of both client and server
//! events, plus their conversions from domain entities.

use chrono::{DateTime, Utc};
use huddle_core::{
    HistoryMessage, Identity, Message, Reaction, ReactionDetail, Room, SenderSnapshot, Snowflake,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// Client payloads
// ============================================================================

/// Data for the `join` event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinPayload {
    pub room_id: Snowflake,
}

/// Data for the `send` event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendPayload {
    pub content: String,
}

/// Data for the `react` event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactPayload {
    pub message_id: Snowflake,
    pub emoji: String,
}

// ============================================================================
// Server payloads
// ============================================================================

/// Data for the `joined` event - room metadata for the joining connection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomJoinedPayload {
    pub room_id: Snowflake,
    pub name: String,
    pub is_private: bool,
    pub history_enabled: bool,
}

impl From<&Room> for RoomJoinedPayload {
    fn from(room: &Room) -> Self {
        Self {
            room_id: room.id,
            name: room.name.clone(),
            is_private: room.is_private,
            history_enabled: room.history_enabled,
        }
    }
}

/// Denormalized sender attached to message payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SenderPayload {
    pub id: Snowflake,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_color: Option<String>,
}

impl From<SenderSnapshot> for SenderPayload {
    fn from(sender: SenderSnapshot) -> Self {
        Self {
            id: sender.id,
            display_name: sender.display_name,
            display_color: sender.display_color,
        }
    }
}

/// The reacting identity attached to reaction payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionActorPayload {
    pub id: Snowflake,
    pub display_name: String,
}

/// A single reaction as carried in `reaction-added` and history payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionPayload {
    pub id: Snowflake,
    pub emoji: String,
    pub user: ReactionActorPayload,
}

impl From<ReactionDetail> for ReactionPayload {
    fn from(detail: ReactionDetail) -> Self {
        Self {
            id: detail.reaction.id,
            emoji: detail.reaction.emoji,
            user: ReactionActorPayload {
                id: detail.actor.id,
                display_name: detail.actor.display_name,
            },
        }
    }
}

impl ReactionPayload {
    /// Build from a freshly stored reaction and the acting identity
    pub fn from_reaction(reaction: &Reaction, actor: &Identity) -> Self {
        Self {
            id: reaction.id,
            emoji: reaction.emoji.clone(),
            user: ReactionActorPayload {
                id: actor.id,
                display_name: actor.display_name.clone(),
            },
        }
    }
}

/// A message as carried in `new-message` and `history` payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePayload {
    pub id: Snowflake,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub sender: SenderPayload,
    pub reactions: Vec<ReactionPayload>,
}

impl MessagePayload {
    /// Build for a freshly stored message: sender snapshot from the live
    /// connection identity, reaction list empty by definition
    pub fn from_new_message(message: &Message, sender: &Identity) -> Self {
        Self {
            id: message.id,
            content: message.content.clone(),
            created_at: message.created_at,
            sender: SenderPayload {
                id: sender.id,
                display_name: sender.display_name.clone(),
                display_color: sender.display_color.clone(),
            },
            reactions: Vec::new(),
        }
    }
}

impl From<HistoryMessage> for MessagePayload {
    fn from(entry: HistoryMessage) -> Self {
        Self {
            id: entry.message.id,
            content: entry.message.content,
            created_at: entry.message.created_at,
            sender: SenderPayload::from(entry.sender),
            reactions: entry.reactions.into_iter().map(ReactionPayload::from).collect(),
        }
    }
}

/// Data for the `reaction-added` event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionAddedPayload {
    pub message_id: Snowflake,
    pub reaction: ReactionPayload,
}

/// Data for `user-joined` / `user-left` presence notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresencePayload {
    pub display_name: String,
}

/// Data for the `error` event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
}
