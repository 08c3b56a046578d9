//! Event source and venue resolver ports
//!
//! Event sources sit upstream of the importer: each one yields a batch of
//! candidate event descriptors on demand. Venue resolution is a separate
//! collaborator so sources can work from an already-resolved venue list.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// A venue with resolved coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Venue {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

/// A raw event descriptor produced by a source, before dedup
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateEvent {
    pub title: String,
    pub lat: f64,
    pub lng: f64,
    pub caption: Option<String>,
    pub bot_source: String,
    pub event_url: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub event_end_date: Option<DateTime<Utc>>,
}

/// Errors raised by sources and resolvers
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("venue resolution failed: {0}")]
    Resolver(String),

    #[error("no venues available")]
    NoVenues,

    #[error("{0}")]
    Other(String),
}

/// Result type for source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// A feed of candidate events
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Source tag recorded as `bot_source` on imported bubbles
    fn name(&self) -> &str;

    /// Produce the current batch of candidate events
    async fn fetch(&self) -> SourceResult<Vec<CandidateEvent>>;
}

/// Resolves a venue name to coordinates
#[async_trait]
pub trait VenueResolver: Send + Sync {
    /// Resolve a venue within a city; `Ok(None)` means the venue could not
    /// be located (not an error)
    async fn resolve(&self, name: &str, city: &str) -> SourceResult<Option<Venue>>;
}
