//! Vote database model

use sqlx::FromRow;

/// Database model for the votes table
#[derive(Debug, Clone, FromRow)]
pub struct VoteModel {
    pub bubble_id: String,
    pub fingerprint: String,
    pub vote: i64,
}
