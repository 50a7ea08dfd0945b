//! Handler error types

use huddle_core::DomainError;
use thiserror::Error;

/// Per-event handler error
///
/// Decides the outcome for the triggering connection: variants with a
/// `client_message` surface as an `error` event to the sender only;
/// the rest are logged and dropped. Nothing here closes the connection
/// or escapes the scope of one operation.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Event received before authentication completed
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Event received before any room was joined
    #[error("Not joined to a room")]
    NotJoined,

    /// Join target does not exist
    #[error("Room not found")]
    RoomNotFound,

    /// Private room, caller is not a participant
    #[error("Access denied")]
    AccessDenied,

    /// Store failure on the message path
    #[error("Message delivery failed: {0}")]
    SendFailed(DomainError),

    /// Store failure on the reaction path
    #[error("Reaction failed: {0}")]
    ReactFailed(DomainError),

    /// Store failure while resolving a join target
    #[error("Join failed: {0}")]
    JoinFailed(DomainError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    /// The message to surface to the triggering connection, if any.
    /// `None` means the failure is logged but nothing is emitted.
    #[must_use]
    pub fn client_message(&self) -> Option<&'static str> {
        match self {
            Self::NotAuthenticated => Some("Not authenticated"),
            Self::NotJoined => Some("Not joined to a room"),
            Self::RoomNotFound => Some("Room not found"),
            Self::AccessDenied => Some("Access denied"),
            Self::SendFailed(_) => Some("Error sending message"),
            Self::ReactFailed(_) => Some("Error adding reaction"),
            Self::JoinFailed(_) => Some("Error joining room"),
            Self::Internal(_) => None,
        }
    }
}

/// Handler result type
pub type HandlerResult<T> = Result<T, HandlerError>;
