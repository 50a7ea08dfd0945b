//! Room database model

use chrono::{DateTime, Utc};
use huddle_core::{Room, Snowflake};
use sqlx::FromRow;
use std::collections::HashSet;

/// Database model for the rooms table
///
/// Participants live in `room_participants` and are attached by the
/// repository when hydrating a `Room`.
#[derive(Debug, Clone, FromRow)]
pub struct RoomModel {
    pub id: i64,
    pub name: String,
    pub is_private: bool,
    pub history_enabled: bool,
    pub owner_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl RoomModel {
    /// Convert to a domain `Room` with the given participant set
    pub fn into_room(self, participants: HashSet<Snowflake>) -> Room {
        Room {
            id: Snowflake::new(self.id),
            name: self.name,
            is_private: self.is_private,
            history_enabled: self.history_enabled,
            owner_id: self.owner_id.map(Snowflake::new),
            participants,
            created_at: self.created_at,
        }
    }
}
