//! Wire protocol
//!
//! JSON text frames with an `{"event": ..., "data": ...}` envelope in both
//! directions. Event names are the contract the original clients speak.

mod messages;
mod payloads;

pub use messages::{ClientEvent, ServerEvent};
pub use payloads::{
    ErrorPayload, JoinPayload, MessagePayload, PresencePayload, ReactPayload, ReactionActorPayload,
    ReactionAddedPayload, ReactionPayload, RoomJoinedPayload, SendPayload, SenderPayload,
};
