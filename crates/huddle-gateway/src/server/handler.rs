//! WebSocket handler - the connection lifecycle manager
//!
//! Owns each connection from handshake through authenticated session to
//! disconnect cleanup, and orchestrates the other gateway components.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{ws::Message, Query, State, WebSocketUpgrade},
    http::{header, HeaderMap},
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use huddle_core::Identity;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::connection::{Connection, ConnectionState};
use crate::handlers::{join_room, EventDispatcher};
use crate::protocol::{ClientEvent, ServerEvent};
use crate::server::GatewayState;

/// Channel buffer size for outgoing events
const OUTBOX_CAPACITY: usize = 100;

/// WebSocket gateway handler
///
/// The bearer token comes from the `Authorization` header or, for browser
/// clients that cannot set WebSocket headers, a `token` query parameter.
pub async fn gateway_handler(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let token = bearer_token(&headers, &params);
    ws.on_upgrade(move |socket| handle_socket(state, socket, token))
}

/// Extract the bearer token from the handshake
fn bearer_token(headers: &HeaderMap, params: &HashMap<String, String>) -> Option<String> {
    if let Some(value) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        if let Some(token) = value.strip_prefix("Bearer ") {
            return Some(token.to_string());
        }
    }
    params.get("token").cloned()
}

/// Handle an upgraded WebSocket connection
async fn handle_socket(
    state: GatewayState,
    mut socket: axum::extract::ws::WebSocket,
    token: Option<String>,
) {
    let connection_id = Uuid::new_v4().to_string();

    // Fail closed: no token, bad token, or unknown identity closes the
    // socket before any event is emitted.
    let identity = match authenticate(&state, token).await {
        Some(identity) => identity,
        None => {
            tracing::debug!(connection_id = %connection_id, "Handshake rejected");
            let _ = socket.send(Message::Close(None)).await;
            return;
        }
    };

    let (tx, mut rx) = mpsc::channel::<ServerEvent>(OUTBOX_CAPACITY);
    let connection = Connection::new(connection_id.clone(), tx);
    connection.set_identity(identity.clone());
    connection.set_state(ConnectionState::Authenticated);
    state.connections().register(connection.clone());

    tracing::info!(
        connection_id = %connection_id,
        user_id = %identity.id,
        display_name = %identity.display_name,
        "Connection authenticated"
    );

    let (mut ws_sink, mut ws_stream) = socket.split();

    // Writer task: drain the outbox into the socket
    let connection_id_send = connection_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event.to_json() {
                Ok(json) => {
                    if ws_sink.send(Message::Text(json.into())).await.is_err() {
                        tracing::debug!(
                            connection_id = %connection_id_send,
                            "Socket write failed; stopping writer"
                        );
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!(
                        connection_id = %connection_id_send,
                        error = %e,
                        "Failed to serialize event"
                    );
                }
            }
        }
        let _ = ws_sink.close().await;
    });

    // Auto-join the default room; failure here means the store is down,
    // which leaves the connection authenticated but roomless.
    if let Err(e) = auto_join(&state, &connection, &identity).await {
        tracing::warn!(
            connection_id = %connection_id,
            error = %e,
            "Default room join failed"
        );
    }

    // Reader loop: one task per connection, events handled sequentially
    let state_recv = state.clone();
    let connection_recv = connection.clone();
    let recv_task = tokio::spawn(async move {
        while let Some(frame) = ws_stream.next().await {
            match frame {
                Ok(Message::Text(text)) => {
                    handle_text_frame(&state_recv, &connection_recv, &text).await;
                }
                Ok(Message::Binary(_)) => {
                    tracing::debug!(
                        connection_id = %connection_recv.connection_id(),
                        "Binary frames not supported; ignoring"
                    );
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {
                    // Liveness is the transport's concern
                }
                Ok(Message::Close(_)) => {
                    tracing::debug!(
                        connection_id = %connection_recv.connection_id(),
                        "Client closed connection"
                    );
                    break;
                }
                Err(e) => {
                    tracing::debug!(
                        connection_id = %connection_recv.connection_id(),
                        error = %e,
                        "WebSocket error"
                    );
                    break;
                }
            }
        }
    });

    // Either task ending means the connection is done
    tokio::select! {
        _ = recv_task => {}
        _ = send_task => {}
    }

    cleanup_connection(&state, &connection);
}

/// Verify the token and resolve the identity; `None` closes the handshake
async fn authenticate(state: &GatewayState, token: Option<String>) -> Option<Identity> {
    let token = token?;

    let identity_id = match state.services().verifier().verify(&token).await {
        Ok(id) => id,
        Err(e) => {
            tracing::debug!(error = %e, "Token verification failed");
            return None;
        }
    };

    match state.services().identity_store().get_identity(identity_id).await {
        Ok(Some(identity)) => Some(identity),
        Ok(None) => {
            tracing::debug!(user_id = %identity_id, "Identity not found for valid token");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "Identity lookup failed during handshake");
            None
        }
    }
}

/// Join the lazily-created default room, announcing to its other members
async fn auto_join(
    state: &GatewayState,
    connection: &Arc<Connection>,
    identity: &Identity,
) -> Result<(), String> {
    let room_id = state.default_room_id().await.map_err(|e| e.to_string())?;

    let room = state
        .services()
        .room_store()
        .find_by_id(room_id)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("default room {room_id} vanished"))?;

    join_room(state, connection, identity, &room, true)
        .await
        .map_err(|e| e.to_string())
}

/// Parse and dispatch one text frame
async fn handle_text_frame(state: &GatewayState, connection: &Arc<Connection>, text: &str) {
    let event = match ClientEvent::from_json(text) {
        Ok(event) => event,
        Err(e) => {
            // Unknown or malformed events are dropped; the connection lives on
            tracing::debug!(
                connection_id = %connection.connection_id(),
                error = %e,
                "Ignoring unparseable frame"
            );
            return;
        }
    };

    if let Err(e) = EventDispatcher::dispatch(state, connection, event).await {
        tracing::debug!(
            connection_id = %connection.connection_id(),
            error = %e,
            "Event handler failed"
        );
        if let Some(message) = e.client_message() {
            let _ = connection.send(ServerEvent::error(message)).await;
        }
    }
}

/// Disconnect cleanup: best-effort and idempotent at every step
fn cleanup_connection(state: &GatewayState, connection: &Arc<Connection>) {
    tracing::info!(
        connection_id = %connection.connection_id(),
        "Cleaning up connection"
    );

    connection.set_state(ConnectionState::Closed);
    state.rooms().disconnect(connection.connection_id());
    state.connections().remove(connection.connection_id());
}
