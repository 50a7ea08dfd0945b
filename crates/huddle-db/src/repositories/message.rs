//! PostgreSQL implementation of MessageStore

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use huddle_core::{
    HistoryMessage, Message, MessageStore, Snowflake, SnowflakeGenerator, StoreResult,
};

use crate::models::{MessageModel, MessageWithSenderModel, ReactionWithActorModel};

use super::error::map_db_error;

/// PostgreSQL implementation of MessageStore
#[derive(Clone)]
pub struct PgMessageStore {
    pool: PgPool,
    ids: Arc<SnowflakeGenerator>,
}

impl PgMessageStore {
    /// Create a new PgMessageStore
    pub fn new(pool: PgPool, ids: Arc<SnowflakeGenerator>) -> Self {
        Self { pool, ids }
    }
}

#[async_trait]
impl MessageStore for PgMessageStore {
    #[instrument(skip(self, content))]
    async fn append(
        &self,
        room_id: Snowflake,
        sender_id: Snowflake,
        content: &str,
    ) -> StoreResult<Message> {
        let id = self.ids.generate();

        let model = sqlx::query_as::<_, MessageModel>(
            r#"
            INSERT INTO messages (id, room_id, sender_id, content, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            RETURNING id, room_id, sender_id, content, created_at
            "#,
        )
        .bind(id.into_inner())
        .bind(room_id.into_inner())
        .bind(sender_id.into_inner())
        .bind(content)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Message::from(model))
    }

    #[instrument(skip(self))]
    async fn recent_messages(
        &self,
        room_id: Snowflake,
        limit: i64,
    ) -> StoreResult<Vec<HistoryMessage>> {
        let limit = limit.clamp(1, 100);

        // Latest N by id (ids are time-ordered), then flip to ascending
        let mut rows = sqlx::query_as::<_, MessageWithSenderModel>(
            r#"
            SELECT m.id, m.room_id, m.sender_id, m.content, m.created_at,
                   i.display_name AS sender_name, i.display_color AS sender_color
            FROM messages m
            JOIN identities i ON i.id = m.sender_id
            WHERE m.room_id = $1
            ORDER BY m.id DESC
            LIMIT $2
            "#,
        )
        .bind(room_id.into_inner())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.reverse();

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let message_ids: Vec<i64> = rows.iter().map(|r| r.id).collect();

        let reaction_rows = sqlx::query_as::<_, ReactionWithActorModel>(
            r#"
            SELECT r.id, r.message_id, r.user_id, r.emoji, r.created_at,
                   i.display_name AS actor_name
            FROM reactions r
            JOIN identities i ON i.id = r.user_id
            WHERE r.message_id = ANY($1)
            ORDER BY r.id ASC
            "#,
        )
        .bind(&message_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let mut reactions_by_message: HashMap<i64, Vec<_>> = HashMap::new();
        for row in reaction_rows {
            reactions_by_message
                .entry(row.message_id)
                .or_default()
                .push(row.into());
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let raw_id = row.id;
                let (message, sender) = row.into_parts();
                HistoryMessage {
                    message,
                    sender,
                    reactions: reactions_by_message.remove(&raw_id).unwrap_or_default(),
                }
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn find_message(&self, id: Snowflake) -> StoreResult<Option<Message>> {
        let result = sqlx::query_as::<_, MessageModel>(
            r#"
            SELECT id, room_id, sender_id, content, created_at
            FROM messages
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Message::from))
    }
}
