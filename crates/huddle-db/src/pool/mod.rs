//! Connection pool management

mod postgres;

pub use postgres::{create_pool, create_pool_from_env, DatabaseConfig};

/// Re-exported pool type used throughout the crate
pub use sqlx::PgPool;
