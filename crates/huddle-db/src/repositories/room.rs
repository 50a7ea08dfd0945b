//! PostgreSQL implementation of RoomStore

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use huddle_core::{
    DomainError, NewRoom, Room, RoomStore, Snowflake, SnowflakeGenerator, StoreResult,
};

use crate::models::RoomModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of RoomStore
#[derive(Clone)]
pub struct PgRoomStore {
    pool: PgPool,
    ids: Arc<SnowflakeGenerator>,
}

impl PgRoomStore {
    /// Create a new PgRoomStore
    pub fn new(pool: PgPool, ids: Arc<SnowflakeGenerator>) -> Self {
        Self { pool, ids }
    }

    /// Load the participant set for a room
    async fn participants_of(&self, room_id: i64) -> StoreResult<HashSet<Snowflake>> {
        let ids: Vec<i64> = sqlx::query_scalar(
            r#"
            SELECT identity_id
            FROM room_participants
            WHERE room_id = $1
            "#,
        )
        .bind(room_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ids.into_iter().map(Snowflake::new).collect())
    }

    /// Batch-load participants for a set of rooms
    async fn participants_for(
        &self,
        room_ids: &[i64],
    ) -> StoreResult<HashMap<i64, HashSet<Snowflake>>> {
        if room_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i64, i64)> = sqlx::query_as(
            r#"
            SELECT room_id, identity_id
            FROM room_participants
            WHERE room_id = ANY($1)
            "#,
        )
        .bind(room_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let mut by_room: HashMap<i64, HashSet<Snowflake>> = HashMap::new();
        for (room_id, identity_id) in rows {
            by_room
                .entry(room_id)
                .or_default()
                .insert(Snowflake::new(identity_id));
        }
        Ok(by_room)
    }
}

#[async_trait]
impl RoomStore for PgRoomStore {
    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Room>> {
        let result = sqlx::query_as::<_, RoomModel>(
            r#"
            SELECT id, name, is_private, history_enabled, owner_id, created_at
            FROM rooms
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match result {
            Some(model) => {
                let participants = self.participants_of(model.id).await?;
                Ok(Some(model.into_room(participants)))
            }
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> StoreResult<Option<Room>> {
        let result = sqlx::query_as::<_, RoomModel>(
            r#"
            SELECT id, name, is_private, history_enabled, owner_id, created_at
            FROM rooms
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match result {
            Some(model) => {
                let participants = self.participants_of(model.id).await?;
                Ok(Some(model.into_room(participants)))
            }
            None => Ok(None),
        }
    }

    #[instrument(skip(self, room))]
    async fn create(&self, room: NewRoom) -> StoreResult<Room> {
        let id = self.ids.generate();
        let name = room.name.clone();

        let model = sqlx::query_as::<_, RoomModel>(
            r#"
            INSERT INTO rooms (id, name, is_private, history_enabled, owner_id, created_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            RETURNING id, name, is_private, history_enabled, owner_id, created_at
            "#,
        )
        .bind(id.into_inner())
        .bind(&room.name)
        .bind(room.is_private)
        .bind(room.history_enabled)
        .bind(room.owner_id.map(Snowflake::into_inner))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::RoomNameExists(name)))?;

        // Participant rows only matter for private rooms
        if room.is_private && !room.participants.is_empty() {
            let participant_ids: Vec<i64> = room
                .participants
                .iter()
                .map(|s| s.into_inner())
                .collect();

            sqlx::query(
                r#"
                INSERT INTO room_participants (room_id, identity_id)
                SELECT $1, UNNEST($2::bigint[])
                "#,
            )
            .bind(model.id)
            .bind(&participant_ids)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        }

        let participants = if room.is_private {
            room.participants
        } else {
            HashSet::new()
        };

        Ok(model.into_room(participants))
    }

    #[instrument(skip(self))]
    async fn list_visible_to(&self, identity_id: Snowflake) -> StoreResult<Vec<Room>> {
        let models = sqlx::query_as::<_, RoomModel>(
            r#"
            SELECT id, name, is_private, history_enabled, owner_id, created_at
            FROM rooms
            WHERE is_private = FALSE
               OR id IN (SELECT room_id FROM room_participants WHERE identity_id = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(identity_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let private_ids: Vec<i64> = models
            .iter()
            .filter(|m| m.is_private)
            .map(|m| m.id)
            .collect();
        let mut by_room = self.participants_for(&private_ids).await?;

        Ok(models
            .into_iter()
            .map(|model| {
                let participants = by_room.remove(&model.id).unwrap_or_default();
                model.into_room(participants)
            })
            .collect())
    }
}
