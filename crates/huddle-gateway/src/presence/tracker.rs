//! Typing presence tracker
//!
//! Maintains each room's set of currently-typing display names. Purely in
//! memory: nothing is persisted and the sets reset on restart. A flag
//! persists until the client clears it or disconnects - there is no
//! server-side expiry, so clients debounce and send `typing-stop` after an
//! inactivity window or on send.

use std::sync::Arc;

use crate::protocol::ServerEvent;
use crate::rooms::RoomRegistry;

/// Tracks per-room typing state through the membership registry
pub struct TypingTracker {
    registry: Arc<RoomRegistry>,
}

impl TypingTracker {
    /// Create a tracker over the given registry
    pub fn new(registry: Arc<RoomRegistry>) -> Self {
        Self { registry }
    }

    /// Mark the connection as typing in its current room and broadcast the
    /// full set. Adding an already-present name is a no-op on the set, but
    /// the broadcast still goes out. Returns false when the connection is
    /// not in any room.
    pub fn start_typing(&self, connection_id: &str) -> bool {
        self.set_typing(connection_id, true)
    }

    /// Clear the connection's typing flag and broadcast the (possibly
    /// unchanged) set. Returns false when the connection is not in any room.
    pub fn stop_typing(&self, connection_id: &str) -> bool {
        self.set_typing(connection_id, false)
    }

    // Mutation and broadcast share one critical section so concurrent
    // updates cannot deliver set snapshots out of order.
    fn set_typing(&self, connection_id: &str, typing: bool) -> bool {
        let Some((room_id, handle)) = self.registry.room_of(connection_id) else {
            return false;
        };

        let mut room = handle.lock();
        let Some(display_name) = room.display_name_of(connection_id).map(str::to_owned) else {
            return false;
        };

        room.set_typing(display_name.clone(), typing);
        let names = room.typing_names();

        tracing::trace!(
            connection_id = %connection_id,
            room_id = %room_id,
            typing = typing,
            set_size = names.len(),
            "Typing state updated"
        );

        room.broadcast(&ServerEvent::typing(names));
        true
    }
}

impl std::fmt::Debug for TypingTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypingTracker").finish_non_exhaustive()
    }
}
