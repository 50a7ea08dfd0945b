//! Message entity - an append-only chat message

use chrono::{DateTime, Utc};

use crate::entities::reaction::ReactionDetail;
use crate::value_objects::Snowflake;

/// Message entity
///
/// Id and `created_at` are assigned by the persistence layer at creation
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Snowflake,
    pub room_id: Snowflake,
    pub sender_id: Snowflake,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Minimal sender identity denormalized into message payloads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderSnapshot {
    pub id: Snowflake,
    pub display_name: String,
    pub display_color: Option<String>,
}

impl SenderSnapshot {
    pub fn new(id: Snowflake, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            display_color: None,
        }
    }
}

impl From<crate::entities::Identity> for SenderSnapshot {
    fn from(identity: crate::entities::Identity) -> Self {
        Self {
            id: identity.id,
            display_name: identity.display_name,
            display_color: identity.display_color,
        }
    }
}

/// A message as replayed in room history: the row plus its sender snapshot
/// and every reaction with the reacting actor attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryMessage {
    pub message: Message,
    pub sender: SenderSnapshot,
    pub reactions: Vec<ReactionDetail>,
}
