//! # bubble-core
//!
//! Domain layer containing entities, value objects, repository traits, and
//! collaborator ports. This crate has zero dependencies on infrastructure
//! (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Bubble, MediaType, Suggestion, SuggestionVote, Vote, VoteValue};
pub use error::DomainError;
pub use traits::{
    BubbleRepository, CandidateEvent, EventSource, MediaStore, RepoResult, SourceError,
    SourceResult, StoredMedia, SuggestionRepository, SweepStats, ToggleOutcome, Venue,
    VenueResolver, VoteRepository,
};
pub use value_objects::{distance_km, BubbleId, Fingerprint, IdParseError, SuggestionId};
