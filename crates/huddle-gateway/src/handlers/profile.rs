//! Profile refresh handler
//!
//! Re-fetches the identity and swaps the cached snapshot. No broadcast:
//! the refreshed name and color appear on the next message sent.

use std::sync::Arc;

use tracing::{debug, warn};

use super::{HandlerError, HandlerResult};
use crate::connection::Connection;
use crate::server::GatewayState;

/// Handles `profile-refresh` events
pub struct ProfileHandler;

impl ProfileHandler {
    /// Refresh the connection's cached identity
    pub async fn handle(state: &GatewayState, connection: &Arc<Connection>) -> HandlerResult<()> {
        let identity = connection.identity().ok_or(HandlerError::NotAuthenticated)?;

        match state.services().identity_store().get_identity(identity.id).await {
            Ok(Some(fresh)) => {
                debug!(
                    connection_id = %connection.connection_id(),
                    user_id = %fresh.id,
                    display_name = %fresh.display_name,
                    "Identity snapshot refreshed"
                );
                connection.set_identity(fresh);
            }
            Ok(None) => {
                // Identity vanished mid-session; keep serving the cached copy
                debug!(
                    connection_id = %connection.connection_id(),
                    user_id = %identity.id,
                    "Identity no longer in store; keeping cached snapshot"
                );
            }
            Err(e) => {
                warn!(
                    connection_id = %connection.connection_id(),
                    error = %e,
                    "Identity refresh failed"
                );
            }
        }

        Ok(())
    }
}
