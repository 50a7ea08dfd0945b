//! Reaction database models

use chrono::{DateTime, Utc};
use huddle_core::{Reaction, ReactionActor, ReactionDetail, Snowflake};
use sqlx::FromRow;

/// Database model for the reactions table
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub id: i64,
    pub message_id: i64,
    pub user_id: i64,
    pub emoji: String,
    pub created_at: DateTime<Utc>,
}

impl From<ReactionModel> for Reaction {
    fn from(model: ReactionModel) -> Self {
        Self {
            id: Snowflake::new(model.id),
            message_id: Snowflake::new(model.message_id),
            user_id: Snowflake::new(model.user_id),
            emoji: model.emoji,
            created_at: model.created_at,
        }
    }
}

/// Reaction row joined with the reacting identity (history replay query)
#[derive(Debug, Clone, FromRow)]
pub struct ReactionWithActorModel {
    pub id: i64,
    pub message_id: i64,
    pub user_id: i64,
    pub emoji: String,
    pub created_at: DateTime<Utc>,
    pub actor_name: String,
}

impl From<ReactionWithActorModel> for ReactionDetail {
    fn from(model: ReactionWithActorModel) -> Self {
        Self {
            actor: ReactionActor {
                id: Snowflake::new(model.user_id),
                display_name: model.actor_name,
            },
            reaction: Reaction {
                id: Snowflake::new(model.id),
                message_id: Snowflake::new(model.message_id),
                user_id: Snowflake::new(model.user_id),
                emoji: model.emoji,
                created_at: model.created_at,
            },
        }
    }
}
