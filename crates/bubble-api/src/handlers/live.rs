//! Live channel handler
//!
//! Upgrades the connection to a WebSocket and registers it as a viewer
//! on the broadcast hub.

use axum::{
    extract::{State, WebSocketUpgrade},
    response::IntoResponse,
};
use bubble_gateway::serve_viewer;

use crate::state::AppState;

/// Subscribe to live map events
///
/// GET /api/live
pub async fn live_channel(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let hub = state.hub();
    ws.on_upgrade(move |socket| serve_viewer(hub, socket))
}
