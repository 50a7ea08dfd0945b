//! PostgreSQL implementation of ReactionStore

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use huddle_core::{
    DomainError, Reaction, ReactionStore, Snowflake, SnowflakeGenerator, StoreResult,
};

use crate::models::ReactionModel;

use super::error::map_unique_violation;

/// PostgreSQL implementation of ReactionStore
///
/// The `UNIQUE(message_id, user_id, emoji)` constraint is the idempotency
/// guarantee: a duplicate insert surfaces as `DuplicateReaction`.
#[derive(Clone)]
pub struct PgReactionStore {
    pool: PgPool,
    ids: Arc<SnowflakeGenerator>,
}

impl PgReactionStore {
    /// Create a new PgReactionStore
    pub fn new(pool: PgPool, ids: Arc<SnowflakeGenerator>) -> Self {
        Self { pool, ids }
    }
}

#[async_trait]
impl ReactionStore for PgReactionStore {
    #[instrument(skip(self))]
    async fn add(
        &self,
        message_id: Snowflake,
        user_id: Snowflake,
        emoji: &str,
    ) -> StoreResult<Reaction> {
        let id = self.ids.generate();

        let model = sqlx::query_as::<_, ReactionModel>(
            r#"
            INSERT INTO reactions (id, message_id, user_id, emoji, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            RETURNING id, message_id, user_id, emoji, created_at
            "#,
        )
        .bind(id.into_inner())
        .bind(message_id.into_inner())
        .bind(user_id.into_inner())
        .bind(emoji)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::DuplicateReaction))?;

        Ok(Reaction::from(model))
    }
}
