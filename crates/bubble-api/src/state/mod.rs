//! Application state
//!
//! Holds the shared state for the Axum application: the service context,
//! the importer, media storage, the broadcast hub, and configuration.

use std::sync::Arc;

use bubble_common::AppConfig;
use bubble_core::MediaStore;
use bubble_db::SqlitePool;
use bubble_gateway::BroadcastHub;
use bubble_service::{Importer, ServiceContext};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    service_context: ServiceContext,
    importer: Arc<Importer>,
    media_store: Arc<dyn MediaStore>,
    hub: Arc<BroadcastHub>,
    pool: SqlitePool,
    config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(
        service_context: ServiceContext,
        importer: Arc<Importer>,
        media_store: Arc<dyn MediaStore>,
        hub: Arc<BroadcastHub>,
        pool: SqlitePool,
        config: AppConfig,
    ) -> Self {
        Self {
            service_context,
            importer,
            media_store,
            hub,
            pool,
            config: Arc::new(config),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the bot content importer
    pub fn importer(&self) -> &Arc<Importer> {
        &self.importer
    }

    /// Get the media store
    pub fn media_store(&self) -> &dyn MediaStore {
        self.media_store.as_ref()
    }

    /// Get the broadcast hub
    pub fn hub(&self) -> Arc<BroadcastHub> {
        self.hub.clone()
    }

    /// Get the database pool (readiness checks)
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("config", &"AppConfig")
            .finish()
    }
}
