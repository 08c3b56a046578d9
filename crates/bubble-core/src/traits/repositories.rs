//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the persistence layer
//! provides the implementation. Read-modify-write operations (vote cast,
//! vote toggle, expiry sweep) are single methods so an implementation can
//! make them atomic; callers never recompute the derived score/count.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::entities::{Bubble, Suggestion, Vote, VoteValue};
use crate::error::DomainError;
use crate::value_objects::{BubbleId, Fingerprint, SuggestionId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Counts of rows removed by one expiry sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// User bubbles past the retention window
    pub user_expired: u64,
    /// Bot bubbles whose event ended
    pub bot_expired: u64,
}

impl SweepStats {
    /// Total bubbles removed
    #[inline]
    pub fn total(&self) -> u64 {
        self.user_expired + self.bot_expired
    }
}

/// Result of toggling a suggestion vote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// Vote count after the toggle
    pub votes: i64,
    /// Whether the voter holds a vote after the toggle
    pub voted: bool,
}

// ============================================================================
// Bubble Repository
// ============================================================================

#[async_trait]
pub trait BubbleRepository: Send + Sync {
    /// Insert a new bubble
    async fn create(&self, bubble: &Bubble) -> RepoResult<()>;

    /// Find bubble by ID
    async fn find_by_id(&self, id: BubbleId) -> RepoResult<Option<Bubble>>;

    /// List all bubbles visible at `now`: user bubbles interacted with
    /// inside the retention window, plus bot bubbles whose event has not
    /// ended (or has no end date)
    async fn list_visible(&self, now: DateTime<Utc>, retention: Duration)
        -> RepoResult<Vec<Bubble>>;

    /// List all user bubbles regardless of visibility
    async fn list_user_bubbles(&self) -> RepoResult<Vec<Bubble>>;

    /// Check whether a bot bubble with the same title and source already
    /// exists within `epsilon` degrees of the given coordinates
    async fn bot_duplicate_exists(
        &self,
        title: &str,
        source: &str,
        lat: f64,
        lng: f64,
        epsilon: f64,
    ) -> RepoResult<bool>;

    /// Delete every bubble whose visibility condition has lapsed at `now`,
    /// cascading deletion of their votes
    async fn delete_expired(&self, now: DateTime<Utc>, retention: Duration)
        -> RepoResult<SweepStats>;

    /// Delete one bubble and its votes
    async fn delete(&self, id: BubbleId) -> RepoResult<()>;
}

// ============================================================================
// Vote Repository
// ============================================================================

#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Find the vote a voter holds on a bubble, if any
    async fn find(&self, bubble_id: BubbleId, voter: &Fingerprint) -> RepoResult<Option<Vote>>;

    /// Cast a vote atomically: insert a new vote row (delta = value) or
    /// overwrite an opposite-direction row (delta = 2 * value), apply the
    /// delta to the bubble score, and refresh `last_interaction`.
    ///
    /// Returns the new score. Fails with `AlreadyVoted` if the voter
    /// already holds a same-direction vote, or `BubbleNotFound` if the
    /// bubble vanished.
    async fn cast(
        &self,
        bubble_id: BubbleId,
        voter: &Fingerprint,
        value: VoteValue,
        now: DateTime<Utc>,
    ) -> RepoResult<i64>;
}

// ============================================================================
// Suggestion Repository
// ============================================================================

#[async_trait]
pub trait SuggestionRepository: Send + Sync {
    /// Insert a new suggestion
    async fn create(&self, suggestion: &Suggestion) -> RepoResult<()>;

    /// Find suggestion by ID
    async fn find_by_id(&self, id: SuggestionId) -> RepoResult<Option<Suggestion>>;

    /// List all suggestions ordered by vote count descending, most recent
    /// first on ties
    async fn list_ranked(&self) -> RepoResult<Vec<Suggestion>>;

    /// Toggle the voter's vote atomically: remove it and decrement the
    /// count if present, otherwise add it and increment.
    ///
    /// Fails with `SuggestionNotFound` if the suggestion is absent.
    async fn toggle_vote(
        &self,
        id: SuggestionId,
        voter: &Fingerprint,
    ) -> RepoResult<ToggleOutcome>;

    /// Check whether the voter currently holds a vote
    async fn has_voted(&self, id: SuggestionId, voter: &Fingerprint) -> RepoResult<bool>;
}
