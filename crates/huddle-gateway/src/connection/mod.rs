//! Connection lifecycle
//!
//! Per-connection state records and the manager tracking all live
//! connections by id.

mod connection;
mod manager;

pub use connection::{Connection, ConnectionState};
pub use manager::ConnectionManager;
