//! Server setup and initialization
//!
//! The composition root: opens the store, wires repositories, sources,
//! the broadcast hub, and the importer into the service context, spawns
//! the periodic tasks, and runs the HTTP server.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use bubble_common::{AppConfig, AppError};
use bubble_core::{EventSource, VenueResolver};
use bubble_db::{
    create_memory_pool, create_pool, init_schema, DatabaseConfig, SqliteBubbleRepository,
    SqliteSuggestionRepository, SqliteVoteRepository,
};
use bubble_gateway::{spawn_heartbeat, BroadcastHub};
use bubble_service::{
    services::spawn_sweep, sources, Importer, MockEventSource, NominatimResolver, ServiceContext,
};
use tokio::net::TcpListener;
use tracing::info;

use crate::media::DiskMediaStore;
use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // Leave headroom over the media cap for the multipart framing
    let body_limit = state.config().storage.max_upload_bytes() + 1024 * 1024;

    let router = create_router().merge(health_routes());
    let router = apply_middleware(router, &state.config().cors);
    router
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Build the default event sources against the configured geocoder
pub fn default_sources(config: &AppConfig) -> Result<Vec<Arc<dyn EventSource>>, AppError> {
    let resolver: Arc<dyn VenueResolver> = Arc::new(
        NominatimResolver::new(&config.importer.geocoder_base_url)
            .map_err(|e| AppError::Config(e.to_string()))?,
    );

    Ok(vec![
        Arc::new(MockEventSource::new(sources::EVENTBRITE, resolver.clone())),
        Arc::new(MockEventSource::new(sources::STUDENT, resolver.clone())),
        Arc::new(MockEventSource::new(sources::COMMUNITY, resolver)),
    ])
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let sources = default_sources(&config)?;
    create_app_state_with_sources(config, sources).await
}

/// Initialize AppState with custom event sources (tests inject stubs here)
pub async fn create_app_state_with_sources(
    config: AppConfig,
    sources: Vec<Arc<dyn EventSource>>,
) -> Result<AppState, AppError> {
    // Open the store; failure here is fatal to startup
    info!(path = %config.database.path, "Opening SQLite store...");
    let pool = if config.database.path == ":memory:" {
        create_memory_pool().await
    } else {
        create_pool(&DatabaseConfig::new(config.database.path.clone())).await
    }
    .map_err(|e| AppError::Storage(e.to_string()))?;
    init_schema(&pool)
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;
    info!("SQLite store ready");

    // Broadcast hub shared by services and the live channel
    let hub = BroadcastHub::new_shared();

    // Create repositories
    let bubble_repo = Arc::new(SqliteBubbleRepository::new(pool.clone()));
    let vote_repo = Arc::new(SqliteVoteRepository::new(pool.clone()));
    let suggestion_repo = Arc::new(SqliteSuggestionRepository::new(pool.clone()));

    // Build service context
    let service_context = ServiceContext::new(
        bubble_repo,
        vote_repo,
        suggestion_repo,
        hub.clone(),
        config.lifecycle.clone(),
        config.map.clone(),
    );

    let importer = Arc::new(Importer::new(
        service_context.clone(),
        sources,
        config.importer.clone(),
    ));
    let media_store = Arc::new(DiskMediaStore::new(
        &config.storage.upload_dir,
        config.storage.max_upload_bytes(),
    ));

    Ok(AppState::new(
        service_context,
        importer,
        media_store,
        hub,
        pool,
        config,
    ))
}

/// Spawn the periodic background tasks: expiry sweep, decay heartbeat,
/// and the bot import cycle
pub fn spawn_background_tasks(state: &AppState) {
    let lifecycle = &state.config().lifecycle;
    spawn_sweep(state.service_context().clone(), lifecycle.sweep_interval());
    spawn_heartbeat(state.hub(), lifecycle.heartbeat_interval());
    state.importer().clone().spawn();
    info!(
        sweep_secs = lifecycle.sweep_interval_secs,
        heartbeat_secs = lifecycle.heartbeat_secs,
        import_secs = state.config().importer.interval_secs,
        "Background tasks started"
    );
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let host: IpAddr = config
        .server
        .host
        .parse()
        .map_err(|_| AppError::Config(format!("Invalid SERVER_HOST: {}", config.server.host)))?;
    let addr = SocketAddr::new(host, config.server.port);

    // Create app state
    let state = create_app_state(config).await?;

    // Start periodic tasks
    spawn_background_tasks(&state);

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, addr).await
}
