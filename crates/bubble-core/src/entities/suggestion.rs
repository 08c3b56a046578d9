//! Suggestion entity - a feature idea on the suggestion board
//!
//! Suggestions never expire. Their vote model is a strict toggle
//! (present = voted, absent = not), unlike bubble voting.

use chrono::{DateTime, Utc};

use crate::value_objects::{Fingerprint, SuggestionId};

/// Suggestion entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub id: SuggestionId,
    pub title: String,
    pub description: Option<String>,
    /// Derived count of suggestion_votes rows, maintained incrementally
    pub votes: i64,
    pub created_at: DateTime<Utc>,
    pub creator_fingerprint: Fingerprint,
}

impl Suggestion {
    /// Create a new Suggestion
    pub fn new(
        id: SuggestionId,
        title: String,
        description: Option<String>,
        creator: Fingerprint,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            votes: 0,
            created_at: now,
            creator_fingerprint: creator,
        }
    }
}

/// Existence-only vote on a suggestion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionVote {
    pub suggestion_id: SuggestionId,
    pub fingerprint: Fingerprint,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_suggestion_starts_unvoted() {
        let s = Suggestion::new(
            SuggestionId::new(),
            "Dark mode for the map".to_string(),
            Some("Easier on the eyes at night".to_string()),
            Fingerprint::derive("1.2.3.4", "ua", "en", ""),
            Utc::now(),
        );
        assert_eq!(s.votes, 0);
        assert!(s.description.is_some());
    }
}
