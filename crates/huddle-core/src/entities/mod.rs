//! Domain entities
//!
//! Plain data types owned by the external stores; the gateway holds
//! read-only snapshots of them per connection.

mod identity;
mod message;
mod reaction;
mod room;

pub use identity::Identity;
pub use message::{HistoryMessage, Message, SenderSnapshot};
pub use reaction::{Reaction, ReactionActor, ReactionDetail};
pub use room::{NewRoom, Room};
