//! Port traits - interfaces the domain needs from the outside world

mod media;
mod repositories;
mod sources;

pub use media::{MediaStore, StoredMedia};
pub use repositories::{
    BubbleRepository, RepoResult, SuggestionRepository, SweepStats, ToggleOutcome, VoteRepository,
};
pub use sources::{CandidateEvent, EventSource, SourceError, SourceResult, Venue, VenueResolver};
