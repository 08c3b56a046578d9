//! # bubble-api
//!
//! HTTP surface and composition root: axum routes and handlers, the
//! fingerprint extractor, error-to-status mapping, disk media storage,
//! and the periodic background tasks (expiry sweep, bot import, decay
//! heartbeat).

pub mod extractors;
pub mod handlers;
pub mod media;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use media::DiskMediaStore;
pub use server::{
    create_app, create_app_state, create_app_state_with_sources, run, run_server,
    spawn_background_tasks,
};
pub use state::AppState;
