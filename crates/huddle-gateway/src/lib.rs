//! # huddle-gateway
//!
//! WebSocket gateway for room-scoped real-time messaging: connection
//! lifecycle, room membership, ordered message delivery with history
//! replay, reaction fan-out, and ephemeral typing presence.

pub mod connection;
pub mod handlers;
pub mod presence;
pub mod protocol;
pub mod rooms;
pub mod server;
