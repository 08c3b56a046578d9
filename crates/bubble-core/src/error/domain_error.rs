//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{BubbleId, SuggestionId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Bubble not found: {0}")]
    BubbleNotFound(BubbleId),

    #[error("Suggestion not found: {0}")]
    SuggestionNotFound(SuggestionId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Vote must be 1 or -1, got {0}")]
    InvalidVote(i64),

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Cannot vote on your own bubble")]
    SelfVote,

    #[error("Already voted")]
    AlreadyVoted,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::BubbleNotFound(_) => "UNKNOWN_BUBBLE",
            Self::SuggestionNotFound(_) => "UNKNOWN_SUGGESTION",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidVote(_) => "INVALID_VOTE",
            Self::SelfVote => "SELF_VOTE",
            Self::AlreadyVoted => "ALREADY_VOTED",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::BubbleNotFound(_) | Self::SuggestionNotFound(_))
    }

    /// Check if this is a rejected-input error (maps to 400)
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::InvalidVote(_) | Self::AlreadyVoted
        )
    }

    /// Check if this is a forbidden action (maps to 403)
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::SelfVote)
    }

    /// Create a validation error
    pub fn validation(msg: impl std::fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let id = BubbleId::new();
        assert_eq!(DomainError::BubbleNotFound(id).code(), "UNKNOWN_BUBBLE");
        assert_eq!(DomainError::SelfVote.code(), "SELF_VOTE");
        assert_eq!(DomainError::AlreadyVoted.code(), "ALREADY_VOTED");
    }

    #[test]
    fn test_classifiers() {
        assert!(DomainError::BubbleNotFound(BubbleId::new()).is_not_found());
        assert!(DomainError::AlreadyVoted.is_rejection());
        assert!(DomainError::InvalidVote(0).is_rejection());
        assert!(DomainError::SelfVote.is_forbidden());
        assert!(!DomainError::Storage("io".to_string()).is_rejection());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::InvalidVote(3);
        assert_eq!(err.to_string(), "Vote must be 1 or -1, got 3");
    }
}
