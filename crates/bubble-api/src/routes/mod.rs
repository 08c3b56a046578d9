//! Route definitions
//!
//! All endpoints are mounted under /api; health probes live at the root.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{bubbles, health, live, ops, suggestions};
use crate::state::AppState;

/// Create the main router with all /api routes
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}

/// Health check routes (mounted at the root, outside /api)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(bubble_routes())
        .merge(suggestion_routes())
        .merge(ops_routes())
        .route("/live", get(live::live_channel))
}

/// Bubble routes
fn bubble_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/bubbles",
            get(bubbles::list_bubbles).post(bubbles::create_bubble),
        )
        .route(
            "/bubbles/:bubble_id/vote",
            post(bubbles::cast_vote).get(bubbles::own_vote),
        )
}

/// Suggestion board routes
fn suggestion_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/suggestions",
            get(suggestions::list_suggestions).post(suggestions::create_suggestion),
        )
        .route(
            "/suggestions/:suggestion_id/vote",
            post(suggestions::toggle_vote).get(suggestions::vote_status),
        )
}

/// Operational routes
fn ops_routes() -> Router<AppState> {
    Router::new()
        .route("/scrape", post(ops::run_scrapers))
        .route("/cleanup", post(ops::purge_distant))
}
