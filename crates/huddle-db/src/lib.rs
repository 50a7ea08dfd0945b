//! # huddle-db
//!
//! PostgreSQL implementations of the `huddle-core` store traits.
//!
//! Schema (five tables):
//! - `identities(id, display_name, display_color)`
//! - `rooms(id, name UNIQUE, is_private, history_enabled, owner_id, created_at)`
//! - `room_participants(room_id, identity_id)`
//! - `messages(id, room_id, sender_id, content, created_at)`
//! - `reactions(id, message_id, user_id, emoji, created_at,
//!    UNIQUE(message_id, user_id, emoji))`

pub mod models;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{PgIdentityStore, PgMessageStore, PgReactionStore, PgRoomStore};
