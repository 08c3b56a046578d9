//! Bubble database model

use sqlx::FromRow;

/// Database model for the bubbles table
///
/// Timestamps are integer milliseconds since the Unix epoch.
#[derive(Debug, Clone, FromRow)]
pub struct BubbleModel {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub title: String,
    pub caption: Option<String>,
    pub media_url: Option<String>,
    pub media_type: Option<String>,
    pub score: i64,
    pub created_at: i64,
    pub last_interaction: i64,
    pub creator_fingerprint: String,
    pub bot_source: Option<String>,
    pub event_url: Option<String>,
    pub event_date: Option<i64>,
    pub event_end_date: Option<i64>,
}
