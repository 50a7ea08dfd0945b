//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Identity not found: {0}")]
    IdentityNotFound(Snowflake),

    #[error("Room not found: {0}")]
    RoomNotFound(Snowflake),

    #[error("Message not found: {0}")]
    MessageNotFound(Snowflake),

    // =========================================================================
    // Authentication / Authorization Errors
    // =========================================================================
    #[error("Invalid token")]
    InvalidToken,

    #[error("Access denied")]
    AccessDenied,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Message content is empty")]
    EmptyContent,

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Reaction already exists")]
    DuplicateReaction,

    #[error("Room name already exists: {0}")]
    RoomNameExists(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::IdentityNotFound(_) => "UNKNOWN_IDENTITY",
            Self::RoomNotFound(_) => "UNKNOWN_ROOM",
            Self::MessageNotFound(_) => "UNKNOWN_MESSAGE",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::AccessDenied => "ACCESS_DENIED",
            Self::EmptyContent => "EMPTY_CONTENT",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::DuplicateReaction => "DUPLICATE_REACTION",
            Self::RoomNameExists(_) => "ROOM_NAME_EXISTS",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::IdentityNotFound(_) | Self::RoomNotFound(_) | Self::MessageNotFound(_)
        )
    }

    /// Check if this is an authentication/authorization error
    #[must_use]
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::InvalidToken | Self::AccessDenied)
    }

    /// Check if this is a validation error
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyContent | Self::ContentTooLong { .. })
    }

    /// Check if this is a conflict error
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::DuplicateReaction | Self::RoomNameExists(_))
    }
}
