//! Gateway state
//!
//! Shared application state for the gateway server.

use std::sync::Arc;

use huddle_common::AppConfig;
use huddle_core::Snowflake;
use huddle_service::{RoomDirectory, ServiceContext, ServiceResult};
use tokio::sync::OnceCell;

use crate::connection::ConnectionManager;
use crate::presence::TypingTracker;
use crate::rooms::RoomRegistry;

/// Name of the room every connection lands in after authentication
pub const DEFAULT_ROOM_NAME: &str = "general";

/// Gateway application state
///
/// Holds all shared dependencies for the gateway server.
#[derive(Clone)]
pub struct GatewayState {
    /// External collaborators (stores, verifier)
    services: Arc<ServiceContext>,
    /// Live connections by id
    connections: Arc<ConnectionManager>,
    /// Room membership registry
    rooms: Arc<RoomRegistry>,
    /// Typing presence tracker
    presence: Arc<TypingTracker>,
    /// Memoized default room id, resolved once at first need
    default_room: Arc<OnceCell<Snowflake>>,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl GatewayState {
    /// Create a new gateway state
    pub fn new(services: ServiceContext, config: AppConfig) -> Self {
        let rooms = RoomRegistry::new_shared();
        Self {
            services: Arc::new(services),
            connections: ConnectionManager::new_shared(),
            presence: Arc::new(TypingTracker::new(rooms.clone())),
            rooms,
            default_room: Arc::new(OnceCell::new()),
            config: Arc::new(config),
        }
    }

    /// Get the service context
    pub fn services(&self) -> &ServiceContext {
        &self.services
    }

    /// Get the connection manager
    pub fn connections(&self) -> &ConnectionManager {
        &self.connections
    }

    /// Get the room registry
    pub fn rooms(&self) -> &RoomRegistry {
        &self.rooms
    }

    /// Get the typing tracker
    pub fn presence(&self) -> &TypingTracker {
        &self.presence
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The default room's id, created lazily on first use.
    ///
    /// The cell is write-once; a duplicate-create race inside
    /// `find_or_create` resolves by re-looking the room up, so every
    /// winner of this initialization observes the same id.
    pub async fn default_room_id(&self) -> ServiceResult<Snowflake> {
        self.default_room
            .get_or_try_init(|| async {
                let directory = RoomDirectory::new(&self.services);
                directory.find_or_create(DEFAULT_ROOM_NAME).await.map(|room| room.id)
            })
            .await
            .copied()
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("connections", &self.connections)
            .field("rooms", &self.rooms)
            .finish_non_exhaustive()
    }
}
