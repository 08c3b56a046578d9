//! Per-viewer WebSocket serve loop
//!
//! Viewers are read-only subscribers: inbound text and binary frames are
//! ignored, close or error ends the session. The viewer is unregistered
//! on any exit path.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tracing::{debug, trace};

use crate::hub::BroadcastHub;

/// Drive one upgraded WebSocket until it disconnects
pub async fn serve_viewer(hub: Arc<BroadcastHub>, socket: WebSocket) {
    let (viewer_id, mut rx) = hub.register();
    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            outgoing = rx.recv() => {
                match outgoing {
                    Some(message) => {
                        if sink.send(Message::Text(message)).await.is_err() {
                            debug!(viewer_id, "Failed to send to viewer, disconnecting");
                            break;
                        }
                    }
                    // Hub pruned this viewer
                    None => break,
                }
            }
            incoming = stream.next() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!(viewer_id, "Viewer closed connection");
                        break;
                    }
                    Some(Ok(frame)) => {
                        trace!(viewer_id, ?frame, "Ignoring inbound frame");
                    }
                    Some(Err(e)) => {
                        debug!(viewer_id, error = %e, "Viewer socket error");
                        break;
                    }
                }
            }
        }
    }

    hub.unregister(viewer_id);
}
