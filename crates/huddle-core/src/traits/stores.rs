//! Store traits (ports) - the interfaces the gateway consumes
//!
//! The gateway core depends on these traits, never on a concrete
//! persistence implementation. `huddle-db` provides the PostgreSQL
//! implementations; tests substitute in-memory ones.

use async_trait::async_trait;

use crate::entities::{HistoryMessage, Identity, Message, NewRoom, Reaction, Room};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for store operations
pub type StoreResult<T> = Result<T, DomainError>;

// ============================================================================
// Token Verifier
// ============================================================================

/// Verifies a pre-issued bearer token and yields the identity id it names.
///
/// Credential issuance lives outside the gateway; this capability is the
/// only authentication surface the core touches.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verify a token, returning the identity id or `InvalidToken`
    async fn verify(&self, token: &str) -> StoreResult<Snowflake>;
}

// ============================================================================
// Identity Store
// ============================================================================

#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Resolve an identity by id
    async fn get_identity(&self, id: Snowflake) -> StoreResult<Option<Identity>>;

    /// List every known identity (used by room-creation tooling)
    async fn list_identities(&self) -> StoreResult<Vec<Identity>>;
}

// ============================================================================
// Room Store
// ============================================================================

#[async_trait]
pub trait RoomStore: Send + Sync {
    /// Find a room by its unique name
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Room>>;

    /// Find a room by id, participants attached
    async fn find_by_id(&self, id: Snowflake) -> StoreResult<Option<Room>>;

    /// Create a room; the store assigns id and creation time
    async fn create(&self, room: NewRoom) -> StoreResult<Room>;

    /// Every public room plus every private room the identity participates
    /// in, ordered newest-created-first
    async fn list_visible_to(&self, identity_id: Snowflake) -> StoreResult<Vec<Room>>;
}

// ============================================================================
// Message Store
// ============================================================================

#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Append a message; the store assigns id and timestamp
    async fn append(
        &self,
        room_id: Snowflake,
        sender_id: Snowflake,
        content: &str,
    ) -> StoreResult<Message>;

    /// Up to `limit` most-recent messages for a room, oldest-to-newest,
    /// each with its sender snapshot and reactions attached
    async fn recent_messages(
        &self,
        room_id: Snowflake,
        limit: i64,
    ) -> StoreResult<Vec<HistoryMessage>>;

    /// Look up a single message (used to resolve a reaction's room)
    async fn find_message(&self, id: Snowflake) -> StoreResult<Option<Message>>;
}

// ============================================================================
// Reaction Store
// ============================================================================

#[async_trait]
pub trait ReactionStore: Send + Sync {
    /// Add a reaction row; `DuplicateReaction` if the (message, user, emoji)
    /// triple already exists
    async fn add(
        &self,
        message_id: Snowflake,
        user_id: Snowflake,
        emoji: &str,
    ) -> StoreResult<Reaction>;
}
