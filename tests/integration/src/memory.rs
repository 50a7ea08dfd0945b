//! In-memory store implementations
//!
//! One struct implementing every store trait, so tests run the full
//! gateway without PostgreSQL. Semantics mirror the `huddle-db`
//! implementations: ids assigned at insert, name uniqueness for rooms,
//! the (message, user, emoji) uniqueness invariant for reactions, and
//! history ordered oldest-to-newest with senders and reactions attached.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use huddle_core::{
    DomainError, HistoryMessage, Identity, IdentityStore, Message, MessageStore, NewRoom, Reaction,
    ReactionActor, ReactionDetail, ReactionStore, Room, RoomStore, SenderSnapshot, Snowflake,
    StoreResult,
};
use parking_lot::Mutex;

/// Shared in-memory backing store
#[derive(Default)]
pub struct MemoryStores {
    identities: Mutex<HashMap<Snowflake, Identity>>,
    rooms: Mutex<Vec<Room>>,
    messages: Mutex<Vec<Message>>,
    reactions: Mutex<Vec<Reaction>>,
    next_id: AtomicI64,
}

impl MemoryStores {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1_000),
            ..Default::default()
        }
    }

    fn generate_id(&self) -> Snowflake {
        Snowflake::new(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    /// Seed an identity
    pub fn add_identity(&self, identity: Identity) {
        self.identities.lock().insert(identity.id, identity);
    }

    /// Replace a seeded identity (profile change)
    pub fn update_identity(&self, identity: Identity) {
        self.add_identity(identity);
    }

    /// Number of stored messages
    pub fn message_count(&self) -> usize {
        self.messages.lock().len()
    }

    /// Number of stored reactions
    pub fn reaction_count(&self) -> usize {
        self.reactions.lock().len()
    }

    /// Stored message contents for a room, insertion order
    pub fn message_contents(&self, room_id: Snowflake) -> Vec<String> {
        self.messages
            .lock()
            .iter()
            .filter(|m| m.room_id == room_id)
            .map(|m| m.content.clone())
            .collect()
    }

    fn sender_snapshot(&self, sender_id: Snowflake) -> SenderSnapshot {
        self.identities
            .lock()
            .get(&sender_id)
            .cloned()
            .map_or_else(
                || SenderSnapshot::new(sender_id, "unknown"),
                SenderSnapshot::from,
            )
    }

    fn actor(&self, user_id: Snowflake) -> ReactionActor {
        let display_name = self
            .identities
            .lock()
            .get(&user_id)
            .map_or_else(|| "unknown".to_string(), |i| i.display_name.clone());
        ReactionActor {
            id: user_id,
            display_name,
        }
    }
}

#[async_trait]
impl IdentityStore for MemoryStores {
    async fn get_identity(&self, id: Snowflake) -> StoreResult<Option<Identity>> {
        Ok(self.identities.lock().get(&id).cloned())
    }

    async fn list_identities(&self) -> StoreResult<Vec<Identity>> {
        let mut identities: Vec<Identity> = self.identities.lock().values().cloned().collect();
        identities.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        Ok(identities)
    }
}

#[async_trait]
impl RoomStore for MemoryStores {
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Room>> {
        Ok(self.rooms.lock().iter().find(|r| r.name == name).cloned())
    }

    async fn find_by_id(&self, id: Snowflake) -> StoreResult<Option<Room>> {
        Ok(self.rooms.lock().iter().find(|r| r.id == id).cloned())
    }

    async fn create(&self, new_room: NewRoom) -> StoreResult<Room> {
        let mut rooms = self.rooms.lock();
        if rooms.iter().any(|r| r.name == new_room.name) {
            return Err(DomainError::RoomNameExists(new_room.name));
        }

        let room = Room {
            id: self.generate_id(),
            name: new_room.name,
            is_private: new_room.is_private,
            history_enabled: new_room.history_enabled,
            owner_id: new_room.owner_id,
            participants: if new_room.is_private {
                new_room.participants
            } else {
                Default::default()
            },
            created_at: Utc::now(),
        };
        rooms.push(room.clone());
        Ok(room)
    }

    async fn list_visible_to(&self, identity_id: Snowflake) -> StoreResult<Vec<Room>> {
        let mut visible: Vec<Room> = self
            .rooms
            .lock()
            .iter()
            .filter(|r| !r.is_private || r.participants.contains(&identity_id))
            .cloned()
            .collect();
        // Newest first; ids are monotonic so they break created_at ties
        visible.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(visible)
    }
}

#[async_trait]
impl MessageStore for MemoryStores {
    async fn append(
        &self,
        room_id: Snowflake,
        sender_id: Snowflake,
        content: &str,
    ) -> StoreResult<Message> {
        let message = Message {
            id: self.generate_id(),
            room_id,
            sender_id,
            content: content.to_string(),
            created_at: Utc::now(),
        };
        self.messages.lock().push(message.clone());
        Ok(message)
    }

    async fn recent_messages(
        &self,
        room_id: Snowflake,
        limit: i64,
    ) -> StoreResult<Vec<HistoryMessage>> {
        let messages = self.messages.lock();
        let mut in_room: Vec<Message> = messages
            .iter()
            .filter(|m| m.room_id == room_id)
            .cloned()
            .collect();
        drop(messages);

        in_room.sort_by_key(|m| m.id);
        let skip = in_room.len().saturating_sub(limit as usize);

        let reactions = self.reactions.lock().clone();

        Ok(in_room
            .into_iter()
            .skip(skip)
            .map(|message| {
                let details: Vec<ReactionDetail> = reactions
                    .iter()
                    .filter(|r| r.message_id == message.id)
                    .map(|r| ReactionDetail::new(r.clone(), self.actor(r.user_id)))
                    .collect();
                HistoryMessage {
                    sender: self.sender_snapshot(message.sender_id),
                    reactions: details,
                    message,
                }
            })
            .collect())
    }

    async fn find_message(&self, id: Snowflake) -> StoreResult<Option<Message>> {
        Ok(self.messages.lock().iter().find(|m| m.id == id).cloned())
    }
}

#[async_trait]
impl ReactionStore for MemoryStores {
    async fn add(
        &self,
        message_id: Snowflake,
        user_id: Snowflake,
        emoji: &str,
    ) -> StoreResult<Reaction> {
        let mut reactions = self.reactions.lock();
        let duplicate = reactions
            .iter()
            .any(|r| r.message_id == message_id && r.user_id == user_id && r.emoji == emoji);
        if duplicate {
            return Err(DomainError::DuplicateReaction);
        }

        let reaction = Reaction {
            id: self.generate_id(),
            message_id,
            user_id,
            emoji: emoji.to_string(),
            created_at: Utc::now(),
        };
        reactions.push(reaction.clone());
        Ok(reaction)
    }
}
