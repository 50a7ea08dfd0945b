//! Client event handlers
//!
//! One handler per client event, routed through a single dispatch table.
//! Handlers are pure with respect to their inputs (connection + payload);
//! their effects are limited to the stores, the membership registry, and
//! the typing tracker.

mod error;
mod join;
mod message;
mod profile;
mod reaction;
mod typing;

pub use error::{HandlerError, HandlerResult};
pub use join::{join_room, JoinHandler, HISTORY_REPLAY_LIMIT};
pub use message::SendHandler;
pub use profile::ProfileHandler;
pub use reaction::ReactHandler;
pub use typing::TypingHandler;

use crate::connection::Connection;
use crate::protocol::ClientEvent;
use crate::server::GatewayState;
use std::sync::Arc;

/// Dispatch incoming client events to their handlers
pub struct EventDispatcher;

impl EventDispatcher {
    /// Handle a parsed client event
    pub async fn dispatch(
        state: &GatewayState,
        connection: &Arc<Connection>,
        event: ClientEvent,
    ) -> HandlerResult<()> {
        tracing::trace!(
            connection_id = %connection.connection_id(),
            event = event.name(),
            "Dispatching event"
        );

        match event {
            ClientEvent::Join(payload) => JoinHandler::handle(state, connection, payload).await,
            ClientEvent::Send(payload) => SendHandler::handle(state, connection, payload).await,
            ClientEvent::React(payload) => ReactHandler::handle(state, connection, payload).await,
            ClientEvent::TypingStart => TypingHandler::start(state, connection),
            ClientEvent::TypingStop => TypingHandler::stop(state, connection),
            ClientEvent::ProfileRefresh => ProfileHandler::handle(state, connection).await,
        }
    }
}
