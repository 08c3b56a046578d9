//! Decay heartbeat
//!
//! Broadcasts a payload-free `decay_tick` on a fixed interval so clients
//! re-render decay-dependent visuals. It mutates no stored state.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::trace;

use crate::events::LiveEvent;
use crate::hub::BroadcastHub;

/// Spawn the periodic heartbeat task
pub fn spawn_heartbeat(hub: Arc<BroadcastHub>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        // The first tick fires immediately; skip it so the cadence starts
        // one period after startup.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let delivered = hub.broadcast(&LiveEvent::DecayTick);
            trace!(delivered, "Decay tick broadcast");
        }
    })
}
