//! Gateway server setup
//!
//! Router construction, dependency wiring, and the run loop.

mod handler;
mod rest;
mod state;

pub use handler::gateway_handler;
pub use state::{GatewayState, DEFAULT_ROOM_NAME};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use huddle_common::{AppConfig, AppError, JwtService};
use huddle_core::SnowflakeGenerator;
use huddle_service::ServiceContext;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Create the gateway router
pub fn create_router() -> Router<GatewayState> {
    Router::new()
        .route("/gateway", get(gateway_handler))
        .route("/api/rooms", get(rest::list_rooms).post(rest::create_room))
        .route("/api/identities", get(rest::list_identities))
        .route("/health", get(health_check))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Build the complete application
pub fn create_app(state: GatewayState) -> Router {
    create_router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Initialize all dependencies and create `GatewayState`
pub async fn create_gateway_state(config: AppConfig) -> Result<GatewayState, AppError> {
    // Create database pool
    tracing::info!("Connecting to PostgreSQL...");
    let db_config = huddle_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = huddle_db::create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    tracing::info!("PostgreSQL connection established");

    // Token verifier
    let verifier = Arc::new(JwtService::new(&config.jwt.secret, config.jwt.token_expiry));

    // Id generator, shared by the stores that assign ids
    let ids = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    // Stores
    let identity_store = Arc::new(huddle_db::PgIdentityStore::new(pool.clone()));
    let room_store = Arc::new(huddle_db::PgRoomStore::new(pool.clone(), ids.clone()));
    let message_store = Arc::new(huddle_db::PgMessageStore::new(pool.clone(), ids.clone()));
    let reaction_store = Arc::new(huddle_db::PgReactionStore::new(pool, ids));

    let services = ServiceContext::new(
        verifier,
        identity_store,
        room_store,
        message_store,
        reaction_store,
    );

    Ok(GatewayState::new(services, config))
}

/// Run the gateway server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    tracing::info!("Starting Gateway server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    tracing::info!("Gateway listening on ws://{}/gateway", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete gateway server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.gateway.port));

    let state = create_gateway_state(config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}
