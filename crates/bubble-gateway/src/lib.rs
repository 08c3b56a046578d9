//! # bubble-gateway
//!
//! Real-time fan-out of state-change events to connected live viewers.
//!
//! The process holds a single broadcast set: the HTTP server embeds one
//! [`BroadcastHub`], services publish [`LiveEvent`]s into it, and every
//! connected WebSocket viewer receives each event. Viewers that close or
//! error are pruned lazily on the next broadcast; a failed send is a
//! disconnect, never retried.

pub mod events;
pub mod heartbeat;
pub mod hub;
pub mod socket;

pub use events::LiveEvent;
pub use heartbeat::spawn_heartbeat;
pub use hub::{BroadcastHub, ViewerId};
pub use socket::serve_viewer;
