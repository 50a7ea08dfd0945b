//! Room entity - a named channel scoping message and presence visibility

use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::value_objects::Snowflake;

/// Room entity
///
/// `participants` is populated only for private rooms; public rooms
/// implicitly admit any authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: Snowflake,
    pub name: String,
    pub is_private: bool,
    pub history_enabled: bool,
    pub owner_id: Option<Snowflake>,
    pub participants: HashSet<Snowflake>,
    pub created_at: DateTime<Utc>,
}

impl Room {
    /// Check whether an identity may join this room
    #[must_use]
    pub fn admits(&self, identity_id: Snowflake) -> bool {
        !self.is_private || self.participants.contains(&identity_id)
    }
}

/// Fields for creating a room; the store assigns id and creation time.
#[derive(Debug, Clone)]
pub struct NewRoom {
    pub name: String,
    pub is_private: bool,
    pub history_enabled: bool,
    pub owner_id: Option<Snowflake>,
    pub participants: HashSet<Snowflake>,
}

impl NewRoom {
    /// A public room with history, owned by nobody (used for the default room)
    pub fn public(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_private: false,
            history_enabled: true,
            owner_id: None,
            participants: HashSet::new(),
        }
    }

    /// A private room; the owner is always unioned into the participant set
    pub fn private(
        name: impl Into<String>,
        owner_id: Snowflake,
        history_enabled: bool,
        participants: impl IntoIterator<Item = Snowflake>,
    ) -> Self {
        let mut participants: HashSet<Snowflake> = participants.into_iter().collect();
        participants.insert(owner_id);
        Self {
            name: name.into(),
            is_private: true,
            history_enabled,
            owner_id: Some(owner_id),
            participants,
        }
    }
}
