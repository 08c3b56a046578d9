//! Response DTOs
//!
//! Timestamps cross the wire as integer milliseconds since the Unix
//! epoch; ids as UUID strings. The creator's fingerprint never leaves
//! the server.

use serde::Serialize;

/// A bubble as sent to clients
#[derive(Debug, Clone, Serialize)]
pub struct BubbleResponse {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub title: String,
    pub caption: Option<String>,
    pub media_url: Option<String>,
    pub media_type: Option<&'static str>,
    pub score: i64,
    pub created_at: i64,
    pub last_interaction: i64,
    pub bot_source: Option<String>,
    pub event_url: Option<String>,
    pub event_date: Option<i64>,
    pub event_end_date: Option<i64>,
}

/// Result of casting a vote
#[derive(Debug, Clone, Serialize)]
pub struct VoteReceipt {
    pub success: bool,
    #[serde(rename = "newScore")]
    pub new_score: i64,
    #[serde(rename = "yourVote")]
    pub your_vote: i64,
}

/// The caller's current vote on a bubble (0 = none)
#[derive(Debug, Clone, Serialize)]
pub struct OwnVote {
    pub vote: i64,
}

/// A suggestion as sent to clients
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub votes: i64,
    pub created_at: i64,
}

/// Result of toggling a suggestion vote
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionVoteReceipt {
    pub success: bool,
    pub votes: i64,
    pub voted: bool,
}

/// Whether the caller currently holds a vote on a suggestion
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionVoteStatus {
    pub voted: bool,
}

/// Result of a manual import cycle
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeResponse {
    pub success: bool,
    pub imported: u64,
}

/// Result of the distant-bubble purge
#[derive(Debug, Clone, Serialize)]
pub struct PurgeResponse {
    pub success: bool,
    pub deleted: u64,
}
