//! Suggestion database model

use sqlx::FromRow;

/// Database model for the suggestions table
#[derive(Debug, Clone, FromRow)]
pub struct SuggestionModel {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub votes: i64,
    pub created_at: i64,
    pub creator_fingerprint: String,
}
