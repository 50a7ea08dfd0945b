//! Typing handlers

use std::sync::Arc;

use super::{HandlerError, HandlerResult};
use crate::connection::Connection;
use crate::server::GatewayState;

/// Handles `typing-start` / `typing-stop` events
pub struct TypingHandler;

impl TypingHandler {
    /// Flag the connection as typing in its current room
    pub fn start(state: &GatewayState, connection: &Arc<Connection>) -> HandlerResult<()> {
        Self::update(state, connection, true)
    }

    /// Clear the connection's typing flag
    pub fn stop(state: &GatewayState, connection: &Arc<Connection>) -> HandlerResult<()> {
        Self::update(state, connection, false)
    }

    fn update(
        state: &GatewayState,
        connection: &Arc<Connection>,
        typing: bool,
    ) -> HandlerResult<()> {
        if !connection.is_authenticated() {
            return Err(HandlerError::NotAuthenticated);
        }

        let updated = if typing {
            state.presence().start_typing(connection.connection_id())
        } else {
            state.presence().stop_typing(connection.connection_id())
        };

        if updated {
            Ok(())
        } else {
            Err(HandlerError::NotJoined)
        }
    }
}
