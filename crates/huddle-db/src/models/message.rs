//! Message database models

use chrono::{DateTime, Utc};
use huddle_core::{Message, SenderSnapshot, Snowflake};
use sqlx::FromRow;

/// Database model for the messages table
#[derive(Debug, Clone, FromRow)]
pub struct MessageModel {
    pub id: i64,
    pub room_id: i64,
    pub sender_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        Self {
            id: Snowflake::new(model.id),
            room_id: Snowflake::new(model.room_id),
            sender_id: Snowflake::new(model.sender_id),
            content: model.content,
            created_at: model.created_at,
        }
    }
}

/// Message row joined with its sender (history replay query)
#[derive(Debug, Clone, FromRow)]
pub struct MessageWithSenderModel {
    pub id: i64,
    pub room_id: i64,
    pub sender_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub sender_name: String,
    pub sender_color: Option<String>,
}

impl MessageWithSenderModel {
    /// Split into the message entity and its denormalized sender snapshot
    pub fn into_parts(self) -> (Message, SenderSnapshot) {
        let sender = SenderSnapshot {
            id: Snowflake::new(self.sender_id),
            display_name: self.sender_name,
            display_color: self.sender_color,
        };
        let message = Message {
            id: Snowflake::new(self.id),
            room_id: Snowflake::new(self.room_id),
            sender_id: Snowflake::new(self.sender_id),
            content: self.content,
            created_at: self.created_at,
        };
        (message, sender)
    }
}
