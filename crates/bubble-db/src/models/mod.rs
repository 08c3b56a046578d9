//! Database models - row structs with SQLx `FromRow` derives

mod bubble;
mod suggestion;
mod vote;

pub use bubble::BubbleModel;
pub use suggestion::SuggestionModel;
pub use vote::VoteModel;
