//! Room directory service
//!
//! Room creation and listing, independent of live connection state. The
//! membership registry consults this (via the room store) for access
//! decisions; the REST surface exposes it to room-creation tooling.

use huddle_core::{NewRoom, Room, Snowflake};
use std::collections::HashSet;
use tracing::{info, instrument};

use crate::dto::{CreateRoomRequest, IdentityResponse, RoomResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Room directory service
pub struct RoomDirectory<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RoomDirectory<'a> {
    /// Create a new RoomDirectory
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a room owned by `owner_id`
    ///
    /// The owner is always part of a private room's participant set, even
    /// when omitted from the request.
    #[instrument(skip(self, request))]
    pub async fn create_room(
        &self,
        owner_id: Snowflake,
        request: CreateRoomRequest,
    ) -> ServiceResult<RoomResponse> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(ServiceError::validation("Room name must not be empty"));
        }

        let participants: HashSet<Snowflake> = if request.is_private {
            request
                .participant_ids
                .iter()
                .copied()
                .chain(std::iter::once(owner_id))
                .collect()
        } else {
            HashSet::new()
        };

        let room = self
            .ctx
            .room_store()
            .create(NewRoom {
                name: name.to_string(),
                is_private: request.is_private,
                history_enabled: request.history_enabled,
                owner_id: Some(owner_id),
                participants,
            })
            .await?;

        info!(room_id = %room.id, name = %room.name, is_private = room.is_private, "Room created");

        Ok(RoomResponse::from(room))
    }

    /// Every public room plus every private room the identity participates
    /// in, newest-created-first
    #[instrument(skip(self))]
    pub async fn list_rooms(&self, identity_id: Snowflake) -> ServiceResult<Vec<RoomResponse>> {
        let rooms = self.ctx.room_store().list_visible_to(identity_id).await?;
        Ok(rooms.into_iter().map(RoomResponse::from).collect())
    }

    /// Every known identity, for participant pickers
    #[instrument(skip(self))]
    pub async fn list_identities(&self) -> ServiceResult<Vec<IdentityResponse>> {
        let identities = self.ctx.identity_store().list_identities().await?;
        Ok(identities.into_iter().map(IdentityResponse::from).collect())
    }

    /// Idempotent lookup-then-create by name, used for the default room.
    ///
    /// A duplicate-create race (two connections arriving on an empty
    /// database) is resolved by retrying the lookup, not by erroring.
    #[instrument(skip(self))]
    pub async fn find_or_create(&self, name: &str) -> ServiceResult<Room> {
        if let Some(room) = self.ctx.room_store().find_by_name(name).await? {
            return Ok(room);
        }

        info!(name = %name, "Creating room on first use");
        match self.ctx.room_store().create(NewRoom::public(name)).await {
            Ok(room) => Ok(room),
            Err(huddle_core::DomainError::RoomNameExists(_)) => {
                let room = self.ctx.room_store().find_by_name(name).await?;
                room.ok_or_else(|| ServiceError::internal("Room vanished after create race"))
            }
            Err(e) => Err(e.into()),
        }
    }
}
