//! Service context - dependency container
//!
//! Holds the store trait objects and the token verifier. Everything the
//! gateway and services touch goes through this container, so tests can
//! substitute in-memory implementations wholesale.

use std::sync::Arc;

use huddle_core::{IdentityStore, MessageStore, ReactionStore, RoomStore, TokenVerifier};

/// Service context containing all external collaborators
#[derive(Clone)]
pub struct ServiceContext {
    verifier: Arc<dyn TokenVerifier>,
    identity_store: Arc<dyn IdentityStore>,
    room_store: Arc<dyn RoomStore>,
    message_store: Arc<dyn MessageStore>,
    reaction_store: Arc<dyn ReactionStore>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        verifier: Arc<dyn TokenVerifier>,
        identity_store: Arc<dyn IdentityStore>,
        room_store: Arc<dyn RoomStore>,
        message_store: Arc<dyn MessageStore>,
        reaction_store: Arc<dyn ReactionStore>,
    ) -> Self {
        Self {
            verifier,
            identity_store,
            room_store,
            message_store,
            reaction_store,
        }
    }

    /// Get the token verifier
    pub fn verifier(&self) -> &dyn TokenVerifier {
        self.verifier.as_ref()
    }

    /// Get the identity store
    pub fn identity_store(&self) -> &dyn IdentityStore {
        self.identity_store.as_ref()
    }

    /// Get the room store
    pub fn room_store(&self) -> &dyn RoomStore {
        self.room_store.as_ref()
    }

    /// Get the message store
    pub fn message_store(&self) -> &dyn MessageStore {
        self.message_store.as_ref()
    }

    /// Get the reaction store
    pub fn reaction_store(&self) -> &dyn ReactionStore {
        self.reaction_store.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext").finish_non_exhaustive()
    }
}
