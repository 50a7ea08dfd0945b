//! Individual gateway connection
//!
//! An explicit record owned by the lifecycle manager and referenced by id
//! everywhere else; other components never hold the live socket.

use crate::protocol::ServerEvent;
use huddle_core::{Identity, Snowflake};
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

/// Connection lifecycle state machine
///
/// `Connecting → Authenticated → Joined(room) → Closed`; disconnect may
/// collapse any state straight to `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Socket accepted, handshake not yet verified
    Connecting,
    /// Token verified, identity attached, not yet in a room
    Authenticated,
    /// Member of exactly this room
    Joined(Snowflake),
    /// Connection is closed; cleanup may already have run
    Closed,
}

/// A single gateway connection
pub struct Connection {
    /// Unique connection id (UUID v4)
    connection_id: String,

    /// Cached identity snapshot (set on successful authentication,
    /// replaced on profile refresh)
    identity: RwLock<Option<Identity>>,

    /// Current lifecycle state
    state: RwLock<ConnectionState>,

    /// Outbound channel drained by the socket writer task
    sender: mpsc::Sender<ServerEvent>,

    /// Connection creation time
    connected_at: Instant,
}

impl Connection {
    /// Create a new connection in the `Connecting` state
    pub fn new(connection_id: String, sender: mpsc::Sender<ServerEvent>) -> Arc<Self> {
        Arc::new(Self {
            connection_id,
            identity: RwLock::new(None),
            state: RwLock::new(ConnectionState::Connecting),
            sender,
            connected_at: Instant::now(),
        })
    }

    /// Get the connection id
    pub fn connection_id(&self) -> &str {
        &self.connection_id
    }

    /// Get the cached identity snapshot (if authenticated)
    pub fn identity(&self) -> Option<Identity> {
        self.identity.read().clone()
    }

    /// Replace the cached identity snapshot
    pub fn set_identity(&self, identity: Identity) {
        *self.identity.write() = Some(identity);
    }

    /// Get the current state
    pub fn state(&self) -> ConnectionState {
        *self.state.read()
    }

    /// Set the connection state
    pub fn set_state(&self, state: ConnectionState) {
        *self.state.write() = state;
    }

    /// Check if the connection has an attached identity
    pub fn is_authenticated(&self) -> bool {
        self.identity.read().is_some()
    }

    /// The room this connection is joined to, if any
    pub fn joined_room(&self) -> Option<Snowflake> {
        match *self.state.read() {
            ConnectionState::Joined(room_id) => Some(room_id),
            _ => None,
        }
    }

    /// Get connection age
    pub fn age(&self) -> std::time::Duration {
        self.connected_at.elapsed()
    }

    /// Send an event to this connection
    pub async fn send(
        &self,
        event: ServerEvent,
    ) -> Result<(), mpsc::error::SendError<ServerEvent>> {
        self.sender.send(event).await
    }

    /// Try to send an event without waiting (used under room locks)
    pub fn try_send(
        &self,
        event: ServerEvent,
    ) -> Result<(), mpsc::error::TrySendError<ServerEvent>> {
        self.sender.try_send(event)
    }

    /// Get a clone of the outbound channel
    pub fn sender(&self) -> mpsc::Sender<ServerEvent> {
        self.sender.clone()
    }

    /// Check if the outbound channel is closed
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("connection_id", &self.connection_id)
            .field("state", &*self.state.read())
            .finish()
    }
}
