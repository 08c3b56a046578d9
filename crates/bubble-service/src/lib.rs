//! # bubble-service
//!
//! Application layer: the bubble lifecycle engine, the suggestion board,
//! the periodic expiry sweep, the distant-bubble purge, and the bot
//! content importer with its mock event sources.

pub mod dto;
pub mod services;
pub mod sources;

// Re-export commonly used types at crate root
pub use dto::{
    BubbleResponse, CreateBubbleRequest, CreateSuggestionRequest, OwnVote, PurgeResponse,
    ScrapeResponse, SuggestionResponse, SuggestionVoteReceipt, SuggestionVoteStatus, VoteReceipt,
    VoteRequest,
};
pub use services::{
    BubbleService, ImportReport, Importer, PurgeService, ServiceContext, ServiceError,
    ServiceResult, SuggestionService, SweepService,
};
pub use sources::{MockEventSource, NominatimResolver, SourceProfile};
