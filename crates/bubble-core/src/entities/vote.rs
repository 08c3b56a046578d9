//! Vote entity - one (bubble, voter) pair
//!
//! At most one vote exists per pair. Casting the opposite direction
//! overwrites the stored row rather than adding a second one.

use crate::value_objects::{BubbleId, Fingerprint};

/// Direction of a vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteValue {
    Up,
    Down,
}

impl VoteValue {
    /// Numeric value as stored and summed into the score (+1 / -1)
    #[inline]
    pub fn value(self) -> i64 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }

    /// Parse a wire value; only +1 and -1 are votes
    pub fn from_value(v: i64) -> Option<Self> {
        match v {
            1 => Some(Self::Up),
            -1 => Some(Self::Down),
            _ => None,
        }
    }

    /// The opposite direction
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    /// Score delta when this vote replaces an opposite-direction vote:
    /// the old vote is reversed and the new one applied in a single step.
    #[inline]
    pub fn reversal_delta(self) -> i64 {
        2 * self.value()
    }
}

/// Vote entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub bubble_id: BubbleId,
    pub fingerprint: Fingerprint,
    pub value: VoteValue,
}

impl Vote {
    /// Create a new Vote
    pub fn new(bubble_id: BubbleId, fingerprint: Fingerprint, value: VoteValue) -> Self {
        Self {
            bubble_id,
            fingerprint,
            value,
        }
    }
}
