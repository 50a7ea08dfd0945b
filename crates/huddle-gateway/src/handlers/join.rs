//! Join handler
//!
//! Resolves the target room, enforces the access policy, switches
//! membership, and replays history to the joining connection.

use std::sync::Arc;

use huddle_core::{Identity, Room};
use tracing::{info, warn};

use super::{HandlerError, HandlerResult};
use crate::connection::{Connection, ConnectionState};
use crate::protocol::{JoinPayload, MessagePayload, RoomJoinedPayload, ServerEvent};
use crate::rooms::RoomMember;
use crate::server::GatewayState;

/// Maximum number of messages replayed on join
pub const HISTORY_REPLAY_LIMIT: i64 = 50;

/// Handles `join` events
pub struct JoinHandler;

impl JoinHandler {
    /// Handle an explicit room switch
    pub async fn handle(
        state: &GatewayState,
        connection: &Arc<Connection>,
        payload: JoinPayload,
    ) -> HandlerResult<()> {
        let identity = connection.identity().ok_or(HandlerError::NotAuthenticated)?;

        // Resolve the room and evaluate policy before touching any room
        // lock; the registry only does membership mechanics.
        let room = state
            .services()
            .room_store()
            .find_by_id(payload.room_id)
            .await
            .map_err(HandlerError::JoinFailed)?
            .ok_or(HandlerError::RoomNotFound)?;

        if !room.admits(identity.id) {
            return Err(HandlerError::AccessDenied);
        }

        join_room(state, connection, &identity, &room, false).await
    }
}

/// Attach a connection to a room: membership switch, `joined` + `history`
/// to the joiner, and (for the initial auto-join) `user-joined` to the
/// room's other members.
pub async fn join_room(
    state: &GatewayState,
    connection: &Arc<Connection>,
    identity: &Identity,
    room: &Room,
    announce: bool,
) -> HandlerResult<()> {
    state.rooms().join(
        RoomMember {
            connection_id: connection.connection_id().to_string(),
            display_name: identity.display_name.clone(),
            sender: connection.sender(),
        },
        room.id,
    );
    connection.set_state(ConnectionState::Joined(room.id));

    connection
        .send(ServerEvent::Joined(RoomJoinedPayload::from(room)))
        .await
        .map_err(|_| HandlerError::Internal("Connection closed during join".to_string()))?;

    // History replay: disabled rooms always replay an empty sequence, and
    // a store failure degrades to an empty sequence instead of tearing the
    // join down.
    let history: Vec<MessagePayload> = if room.history_enabled {
        match state
            .services()
            .message_store()
            .recent_messages(room.id, HISTORY_REPLAY_LIMIT)
            .await
        {
            Ok(entries) => entries.into_iter().map(MessagePayload::from).collect(),
            Err(e) => {
                warn!(
                    room_id = %room.id,
                    error = %e,
                    "History fetch failed; replaying empty history"
                );
                Vec::new()
            }
        }
    } else {
        Vec::new()
    };

    connection
        .send(ServerEvent::History(history))
        .await
        .map_err(|_| HandlerError::Internal("Connection closed during join".to_string()))?;

    if announce {
        state.rooms().broadcast_except(
            room.id,
            &ServerEvent::user_joined(identity.display_name.clone()),
            connection.connection_id(),
        );
    }

    info!(
        connection_id = %connection.connection_id(),
        room_id = %room.id,
        room = %room.name,
        user_id = %identity.id,
        "Joined room"
    );

    Ok(())
}
