//! React handler - the reaction aggregator
//!
//! Records a reaction idempotently and fans it out to the message's room.

use std::sync::Arc;

use huddle_core::DomainError;
use tracing::{debug, info};

use super::{HandlerError, HandlerResult};
use crate::connection::Connection;
use crate::protocol::{ReactPayload, ReactionAddedPayload, ReactionPayload, ServerEvent};
use crate::server::GatewayState;

/// Handles `react` events
pub struct ReactHandler;

impl ReactHandler {
    /// Handle a reaction
    pub async fn handle(
        state: &GatewayState,
        connection: &Arc<Connection>,
        payload: ReactPayload,
    ) -> HandlerResult<()> {
        let identity = connection.identity().ok_or(HandlerError::NotAuthenticated)?;
        state
            .rooms()
            .current_room(connection.connection_id())
            .ok_or(HandlerError::NotJoined)?;

        let reaction = match state
            .services()
            .reaction_store()
            .add(payload.message_id, identity.id, &payload.emoji)
            .await
        {
            Ok(reaction) => reaction,
            Err(DomainError::DuplicateReaction) => {
                // Benign no-op: nothing stored, nothing broadcast, nothing
                // surfaced to the actor
                debug!(
                    message_id = %payload.message_id,
                    user_id = %identity.id,
                    emoji = %payload.emoji,
                    "Duplicate reaction ignored"
                );
                return Ok(());
            }
            Err(e) => return Err(HandlerError::ReactFailed(e)),
        };

        info!(
            message_id = %payload.message_id,
            user_id = %identity.id,
            emoji = %payload.emoji,
            "Reaction added"
        );

        // The broadcast targets the message's room, resolved now - not the
        // actor's current room
        let message = state
            .services()
            .message_store()
            .find_message(payload.message_id)
            .await
            .map_err(HandlerError::ReactFailed)?;

        match message {
            Some(message) => {
                let event = ServerEvent::ReactionAdded(ReactionAddedPayload {
                    message_id: payload.message_id,
                    reaction: ReactionPayload::from_reaction(&reaction, &identity),
                });
                state.rooms().broadcast(message.room_id, &event);
            }
            None => {
                debug!(
                    message_id = %payload.message_id,
                    "Reacted message has no resolvable room; broadcast skipped"
                );
            }
        }

        Ok(())
    }
}
