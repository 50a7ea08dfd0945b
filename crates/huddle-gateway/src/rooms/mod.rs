//! Room membership
//!
//! The registry is the per-room serialization point: every room-scoped
//! mutation and broadcast passes through one lock per room, so delivery
//! order within a room equals admission order.

mod registry;

pub use registry::{RoomHandle, RoomMember, RoomRegistry};
