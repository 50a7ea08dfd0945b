//! # huddle-service
//!
//! Application layer: the dependency container handed to the gateway and
//! the room directory service backing room creation and listing.

pub mod dto;
pub mod services;

pub use dto::{CreateRoomRequest, IdentityResponse, RoomResponse};
pub use services::{RoomDirectory, ServiceContext, ServiceError, ServiceResult};
