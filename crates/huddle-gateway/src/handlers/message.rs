//! Send handler - the message pipeline
//!
//! Validates, persists, and broadcasts a chat message to the sender's
//! current room.

use std::sync::Arc;

use tracing::{info, trace};

use super::{HandlerError, HandlerResult};
use crate::connection::Connection;
use crate::protocol::{MessagePayload, SendPayload, ServerEvent};
use crate::server::GatewayState;

/// Handles `send` events
pub struct SendHandler;

impl SendHandler {
    /// Handle a message send
    pub async fn handle(
        state: &GatewayState,
        connection: &Arc<Connection>,
        payload: SendPayload,
    ) -> HandlerResult<()> {
        let identity = connection.identity().ok_or(HandlerError::NotAuthenticated)?;
        let room_id = state
            .rooms()
            .current_room(connection.connection_id())
            .ok_or(HandlerError::NotJoined)?;

        // Empty sends are ignored: no event in either direction
        let content = payload.content.trim();
        if content.is_empty() {
            trace!(
                connection_id = %connection.connection_id(),
                "Ignoring empty send"
            );
            return Ok(());
        }

        // The store assigns id and timestamp
        let message = state
            .services()
            .message_store()
            .append(room_id, identity.id, content)
            .await
            .map_err(HandlerError::SendFailed)?;

        info!(
            message_id = %message.id,
            room_id = %room_id,
            user_id = %identity.id,
            "Message created"
        );

        // Everyone in the room gets the message, sender included
        let event = ServerEvent::NewMessage(MessagePayload::from_new_message(&message, &identity));
        state.rooms().broadcast(room_id, &event);

        Ok(())
    }
}
