//! Request DTOs

use huddle_core::Snowflake;
use serde::Deserialize;

/// Request body for room creation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub name: String,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default = "default_history_enabled")]
    pub history_enabled: bool,
    #[serde(default)]
    pub participant_ids: Vec<Snowflake>,
}

fn default_history_enabled() -> bool {
    true
}
