//! Request and response DTOs

mod mappers;
mod requests;
mod responses;

pub use requests::{CreateBubbleRequest, CreateSuggestionRequest, VoteRequest};
pub use responses::{
    BubbleResponse, OwnVote, PurgeResponse, ScrapeResponse, SuggestionResponse,
    SuggestionVoteReceipt, SuggestionVoteStatus, VoteReceipt,
};
