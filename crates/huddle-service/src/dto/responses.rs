//! Response DTOs

use huddle_core::{Identity, Room, Snowflake};
use serde::Serialize;

/// Room as exposed over the directory API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub id: Snowflake,
    pub name: String,
    pub is_private: bool,
    pub history_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<Snowflake>,
    pub participant_ids: Vec<Snowflake>,
}

impl From<Room> for RoomResponse {
    fn from(room: Room) -> Self {
        let mut participant_ids: Vec<Snowflake> = room.participants.into_iter().collect();
        participant_ids.sort();

        Self {
            id: room.id,
            name: room.name,
            is_private: room.is_private,
            history_enabled: room.history_enabled,
            owner_id: room.owner_id,
            participant_ids,
        }
    }
}

/// Identity as exposed over the directory API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityResponse {
    pub id: Snowflake,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_color: Option<String>,
}

impl From<Identity> for IdentityResponse {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            display_name: identity.display_name,
            display_color: identity.display_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashSet;

    #[test]
    fn test_room_response_sorted_participants() {
        let room = Room {
            id: Snowflake::new(1),
            name: "ops".to_string(),
            is_private: true,
            history_enabled: true,
            owner_id: Some(Snowflake::new(9)),
            participants: HashSet::from([Snowflake::new(3), Snowflake::new(1), Snowflake::new(2)]),
            created_at: Utc::now(),
        };

        let response = RoomResponse::from(room);
        assert_eq!(
            response.participant_ids,
            vec![Snowflake::new(1), Snowflake::new(2), Snowflake::new(3)]
        );
    }

    #[test]
    fn test_identity_response_serialization() {
        let identity = Identity::new(Snowflake::new(4), "ada");
        let json = serde_json::to_string(&IdentityResponse::from(identity)).unwrap();
        assert_eq!(json, r#"{"id":"4","displayName":"ada"}"#);
    }
}
