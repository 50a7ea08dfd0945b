//! Data transfer objects for the room directory surface

mod requests;
mod responses;

pub use requests::CreateRoomRequest;
pub use responses::{IdentityResponse, RoomResponse};
