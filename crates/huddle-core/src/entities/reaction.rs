//! Reaction entity - an emoji annotation on a message
//!
//! At most one reaction row exists per (message, user, emoji) triple; the
//! store enforces this and reports violations as `DuplicateReaction`.

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Reaction entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub id: Snowflake,
    pub message_id: Snowflake,
    pub user_id: Snowflake,
    pub emoji: String,
    pub created_at: DateTime<Utc>,
}

/// The reacting identity as attached to broadcast/history payloads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionActor {
    pub id: Snowflake,
    pub display_name: String,
}

/// A reaction with its actor attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionDetail {
    pub reaction: Reaction,
    pub actor: ReactionActor,
}

impl ReactionDetail {
    pub fn new(reaction: Reaction, actor: ReactionActor) -> Self {
        Self { reaction, actor }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaction_detail() {
        let reaction = Reaction {
            id: Snowflake::new(5),
            message_id: Snowflake::new(1),
            user_id: Snowflake::new(2),
            emoji: "👍".to_string(),
            created_at: Utc::now(),
        };
        let detail = ReactionDetail::new(
            reaction,
            ReactionActor {
                id: Snowflake::new(2),
                display_name: "ada".to_string(),
            },
        );
        assert_eq!(detail.reaction.emoji, "👍");
        assert_eq!(detail.actor.display_name, "ada");
    }
}
