//! Database row models (sqlx `FromRow`) and their entity conversions

mod identity;
mod message;
mod reaction;
mod room;

pub use identity::IdentityModel;
pub use message::{MessageModel, MessageWithSenderModel};
pub use reaction::{ReactionModel, ReactionWithActorModel};
pub use room::RoomModel;
