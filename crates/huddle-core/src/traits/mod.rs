//! Store and verifier traits (ports)

mod stores;

pub use stores::{
    IdentityStore, MessageStore, ReactionStore, RoomStore, StoreResult, TokenVerifier,
};
