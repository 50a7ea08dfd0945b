//! PostgreSQL implementation of IdentityStore

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use huddle_core::{Identity, IdentityStore, Snowflake, StoreResult};

use crate::models::IdentityModel;

use super::error::map_db_error;

/// PostgreSQL implementation of IdentityStore
#[derive(Clone)]
pub struct PgIdentityStore {
    pool: PgPool,
}

impl PgIdentityStore {
    /// Create a new PgIdentityStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityStore for PgIdentityStore {
    #[instrument(skip(self))]
    async fn get_identity(&self, id: Snowflake) -> StoreResult<Option<Identity>> {
        let result = sqlx::query_as::<_, IdentityModel>(
            r#"
            SELECT id, display_name, display_color
            FROM identities
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Identity::from))
    }

    #[instrument(skip(self))]
    async fn list_identities(&self) -> StoreResult<Vec<Identity>> {
        let results = sqlx::query_as::<_, IdentityModel>(
            r#"
            SELECT id, display_name, display_color
            FROM identities
            ORDER BY display_name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Identity::from).collect())
    }
}
