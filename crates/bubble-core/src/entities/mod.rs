//! Domain entities

mod bubble;
mod suggestion;
mod vote;

pub use bubble::{Bubble, MediaType};
pub use suggestion::{Suggestion, SuggestionVote};
pub use vote::{Vote, VoteValue};
