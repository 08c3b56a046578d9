//! Live events - the messages pushed to connected viewers
//!
//! Wire format is a JSON object tagged by `type`, e.g.
//! `{"type": "new_bubble", "bubble": {...}}`. `decay_tick` is a pure
//! heartbeat: it carries no payload and corresponds to no state mutation,
//! it only tells clients to re-render decay-dependent visuals.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

/// All events pushed over the live channel
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveEvent {
    NewBubble { bubble: Value },
    UpdateBubble { bubble: Value },
    NewSuggestion { suggestion: Value },
    UpdateSuggestion { suggestion: Value },
    /// The visible set changed wholesale; clients should refetch
    Cleanup,
    /// Periodic heartbeat, no payload
    DecayTick,
}

impl LiveEvent {
    /// Get the event type name as sent on the wire
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NewBubble { .. } => "new_bubble",
            Self::UpdateBubble { .. } => "update_bubble",
            Self::NewSuggestion { .. } => "new_suggestion",
            Self::UpdateSuggestion { .. } => "update_suggestion",
            Self::Cleanup => "cleanup",
            Self::DecayTick => "decay_tick",
        }
    }

    /// A `new_bubble` event carrying the full bubble body
    pub fn new_bubble(bubble: &impl Serialize) -> Self {
        Self::NewBubble {
            bubble: to_payload(bubble),
        }
    }

    /// An `update_bubble` event carrying the full updated bubble body
    pub fn update_bubble(bubble: &impl Serialize) -> Self {
        Self::UpdateBubble {
            bubble: to_payload(bubble),
        }
    }

    /// A `new_suggestion` event
    pub fn new_suggestion(suggestion: &impl Serialize) -> Self {
        Self::NewSuggestion {
            suggestion: to_payload(suggestion),
        }
    }

    /// An `update_suggestion` event
    pub fn update_suggestion(suggestion: &impl Serialize) -> Self {
        Self::UpdateSuggestion {
            suggestion: to_payload(suggestion),
        }
    }
}

fn to_payload(body: &impl Serialize) -> Value {
    match serde_json::to_value(body) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Failed to serialize event payload");
            Value::Null
        }
    }
}
