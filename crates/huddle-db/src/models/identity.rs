//! Identity database model

use huddle_core::{Identity, Snowflake};
use sqlx::FromRow;

/// Database model for the identities table
#[derive(Debug, Clone, FromRow)]
pub struct IdentityModel {
    pub id: i64,
    pub display_name: String,
    pub display_color: Option<String>,
}

impl From<IdentityModel> for Identity {
    fn from(model: IdentityModel) -> Self {
        Self {
            id: Snowflake::new(model.id),
            display_name: model.display_name,
            display_color: model.display_color,
        }
    }
}
