//! Broadcast hub
//!
//! Tracks all connected live viewers using DashMap for thread-safe access
//! and fans serialized events out to them. The hub is handed to components
//! at construction rather than living in a global, so tests can observe
//! broadcasts through a registered receiver.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::events::LiveEvent;

/// Identifier of a registered viewer
pub type ViewerId = u64;

/// Buffered messages per viewer before a send counts as failed
const VIEWER_BUFFER_SIZE: usize = 64;

/// The set of currently-connected live viewers
pub struct BroadcastHub {
    /// Serialized-event senders by viewer id
    viewers: DashMap<ViewerId, mpsc::Sender<String>>,
    next_id: AtomicU64,
    buffer_size: usize,
}

impl BroadcastHub {
    /// Create a new hub
    #[must_use]
    pub fn new() -> Self {
        Self::with_buffer(VIEWER_BUFFER_SIZE)
    }

    /// Create a hub with a custom per-viewer buffer size
    #[must_use]
    pub fn with_buffer(buffer_size: usize) -> Self {
        Self {
            viewers: DashMap::new(),
            next_id: AtomicU64::new(1),
            buffer_size,
        }
    }

    /// Create a new hub wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a viewer; returns its id and the receiving end of its queue
    pub fn register(&self) -> (ViewerId, mpsc::Receiver<String>) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel(self.buffer_size);
        self.viewers.insert(id, tx);
        debug!(viewer_id = id, viewers = self.viewer_count(), "Viewer registered");
        (id, rx)
    }

    /// Remove a viewer; unknown ids are a no-op
    pub fn unregister(&self, id: ViewerId) {
        if self.viewers.remove(&id).is_some() {
            debug!(viewer_id = id, viewers = self.viewer_count(), "Viewer unregistered");
        }
    }

    /// Number of currently registered viewers
    pub fn viewer_count(&self) -> usize {
        self.viewers.len()
    }

    /// Send an event to every registered viewer
    ///
    /// The event is serialized once. Viewers whose queue is closed or full
    /// are treated as disconnected and pruned. Returns the number of
    /// viewers the event was delivered to.
    pub fn broadcast(&self, event: &LiveEvent) -> usize {
        let message = match serde_json::to_string(event) {
            Ok(message) => message,
            Err(e) => {
                warn!(kind = event.kind(), error = %e, "Failed to serialize live event");
                return 0;
            }
        };

        let mut stale = Vec::new();
        let mut delivered = 0;

        for entry in &self.viewers {
            if entry.value().try_send(message.clone()).is_ok() {
                delivered += 1;
            } else {
                stale.push(*entry.key());
            }
        }

        for id in stale {
            self.unregister(id);
        }

        delivered
    }
}

impl Default for BroadcastHub {
    fn default() -> Self {
        Self::new()
    }
}
