//! Room membership registry
//!
//! Tracks which connection belongs to which room and owns each room's
//! member set and typing set under a single per-room mutex. Broadcasts
//! enqueue into member outboxes while that mutex is held (enqueue never
//! blocks), which is what makes per-room delivery order match admission
//! order. Store calls never happen under a room lock - callers resolve
//! rooms and policy before touching the registry.

use crate::protocol::ServerEvent;
use dashmap::DashMap;
use huddle_core::Snowflake;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::mpsc;

/// A room member: the connection's id, display name, and outbound channel.
///
/// The registry holds the outbox handle directly so broadcasting needs no
/// detour through the connection manager.
#[derive(Debug, Clone)]
pub struct RoomMember {
    pub connection_id: String,
    pub display_name: String,
    pub sender: mpsc::Sender<ServerEvent>,
}

/// Mutable per-room state, guarded by the room's mutex
#[derive(Default)]
pub struct RoomInner {
    members: HashMap<String, RoomMember>,
    typing: HashSet<String>,
}

impl RoomInner {
    /// Enqueue an event to every member.
    ///
    /// A member whose outbox is full misses the event rather than stalling
    /// the room (slow-consumer policy); the writer task will notice a
    /// closed channel on disconnect.
    pub(crate) fn broadcast(&self, event: &ServerEvent) {
        for member in self.members.values() {
            let _ = member.sender.try_send(event.clone());
        }
    }

    /// Enqueue an event to every member except one connection
    pub(crate) fn broadcast_except(&self, event: &ServerEvent, except: &str) {
        for member in self.members.values() {
            if member.connection_id != except {
                let _ = member.sender.try_send(event.clone());
            }
        }
    }

    /// Display name of a member connection
    pub(crate) fn display_name_of(&self, connection_id: &str) -> Option<&str> {
        self.members.get(connection_id).map(|m| m.display_name.as_str())
    }

    /// Add or remove a name in the typing set; returns whether it changed
    pub(crate) fn set_typing(&mut self, display_name: String, typing: bool) -> bool {
        if typing {
            self.typing.insert(display_name)
        } else {
            self.typing.remove(&display_name)
        }
    }

    /// Sorted snapshot of the typing set
    pub(crate) fn typing_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.typing.iter().cloned().collect();
        names.sort();
        names
    }

    fn member_count(&self) -> usize {
        self.members.len()
    }
}

/// Shared handle to one room's state
pub type RoomHandle = Arc<Mutex<RoomInner>>;

/// Room membership registry
pub struct RoomRegistry {
    /// Live per-room state, created on first join
    rooms: DashMap<Snowflake, RoomHandle>,
    /// Reverse index: connection id to its current room
    current: DashMap<String, Snowflake>,
}

impl RoomRegistry {
    /// Create a new registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
            current: DashMap::new(),
        }
    }

    /// Create a new registry wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    fn handle(&self, room_id: Snowflake) -> RoomHandle {
        self.rooms.entry(room_id).or_default().clone()
    }

    /// Add a connection to a room, atomically detaching it from its
    /// previous room first. The connection is never observable in two
    /// member sets at once.
    ///
    /// Access policy (`RoomNotFound`, `AccessDenied`) is the caller's
    /// responsibility - it is evaluated against the resolved room before
    /// any lock is taken.
    pub fn join(&self, member: RoomMember, room_id: Snowflake) {
        let connection_id = member.connection_id.clone();

        let previous = self.current.insert(connection_id.clone(), room_id);
        if let Some(old_room) = previous {
            if old_room == room_id {
                // Rejoining the current room; membership is unchanged
                return;
            }
            self.detach(old_room, &connection_id);
        }

        let handle = self.handle(room_id);
        let mut room = handle.lock();
        room.members.insert(connection_id.clone(), member);

        tracing::debug!(
            connection_id = %connection_id,
            room_id = %room_id,
            members = room.member_count(),
            "Connection joined room"
        );
    }

    /// Remove a connection from a room's member set and typing set,
    /// re-broadcasting the typing set to the remaining members only if it
    /// actually changed. No presence event is emitted (room switches are
    /// silent; disconnects use [`Self::disconnect`]).
    fn detach(&self, room_id: Snowflake, connection_id: &str) {
        let handle = self.handle(room_id);
        let mut room = handle.lock();

        if let Some(member) = room.members.remove(connection_id) {
            if room.typing.remove(&member.display_name) {
                let event = ServerEvent::typing(room.typing_names());
                room.broadcast(&event);
            }
        }
    }

    /// Full disconnect cleanup: remove membership, clear the typing flag
    /// (re-broadcast only on change), and notify remaining members with
    /// `user-left`. Idempotent - cleaning an already-cleaned connection is
    /// a no-op. Returns the room that was left, if any.
    pub fn disconnect(&self, connection_id: &str) -> Option<Snowflake> {
        let (_, room_id) = self.current.remove(connection_id)?;

        let handle = self.handle(room_id);
        let mut room = handle.lock();

        let member = room.members.remove(connection_id)?;
        room.broadcast(&ServerEvent::user_left(member.display_name.clone()));

        if room.typing.remove(&member.display_name) {
            let event = ServerEvent::typing(room.typing_names());
            room.broadcast(&event);
        }

        tracing::debug!(
            connection_id = %connection_id,
            room_id = %room_id,
            members = room.member_count(),
            "Connection left room"
        );

        Some(room_id)
    }

    /// The room a connection currently belongs to
    pub fn current_room(&self, connection_id: &str) -> Option<Snowflake> {
        self.current.get(connection_id).map(|r| *r)
    }

    /// Connection ids of a room's current members
    pub fn members_of(&self, room_id: Snowflake) -> HashSet<String> {
        self.rooms
            .get(&room_id)
            .map(|handle| handle.lock().members.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Shared handle to a room's state, for callers that need to combine a
    /// mutation and a broadcast in one critical section
    pub(crate) fn room_of(&self, connection_id: &str) -> Option<(Snowflake, RoomHandle)> {
        let room_id = self.current_room(connection_id)?;
        Some((room_id, self.handle(room_id)))
    }

    /// Broadcast an event to every current member of a room
    pub fn broadcast(&self, room_id: Snowflake, event: &ServerEvent) {
        let Some(handle) = self.rooms.get(&room_id).map(|r| r.clone()) else {
            return;
        };
        handle.lock().broadcast(event);
    }

    /// Broadcast to every member except one connection
    pub fn broadcast_except(&self, room_id: Snowflake, event: &ServerEvent, except: &str) {
        let Some(handle) = self.rooms.get(&room_id).map(|r| r.clone()) else {
            return;
        };
        handle.lock().broadcast_except(event, except);
    }

    /// Number of rooms with live state
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RoomRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoomRegistry")
            .field("rooms", &self.rooms.len())
            .field("connections", &self.current.len())
            .finish()
    }
}
