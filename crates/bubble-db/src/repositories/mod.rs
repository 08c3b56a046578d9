//! Repository implementations

mod bubble;
mod error;
mod suggestion;
mod vote;

pub use bubble::SqliteBubbleRepository;
pub use error::map_db_error;
pub use suggestion::SqliteSuggestionRepository;
pub use vote::SqliteVoteRepository;
