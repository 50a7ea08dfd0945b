//! PostgreSQL store implementations

mod error;
mod identity;
mod message;
mod reaction;
mod room;

pub use identity::PgIdentityStore;
pub use message::PgMessageStore;
pub use reaction::PgReactionStore;
pub use room::PgRoomStore;
