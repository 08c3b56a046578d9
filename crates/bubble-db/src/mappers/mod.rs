//! Entity ↔ model mappers
//!
//! Row models carry raw strings and millisecond integers; entities carry
//! typed ids, fingerprints, and `DateTime<Utc>`. Conversion from the store
//! is fallible because a corrupt row (bad id, bad timestamp) must surface
//! as a storage error rather than a panic.

mod bubble;
mod suggestion;
mod vote;

use bubble_core::DomainError;
use chrono::{DateTime, Utc};

/// Convert stored millisecond timestamp to a UTC datetime
pub(crate) fn millis_to_datetime(ms: i64) -> Result<DateTime<Utc>, DomainError> {
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| DomainError::Storage(format!("timestamp out of range: {ms}")))
}

/// Convert a UTC datetime to the stored millisecond representation
pub(crate) fn datetime_to_millis(dt: DateTime<Utc>) -> i64 {
    dt.timestamp_millis()
}
