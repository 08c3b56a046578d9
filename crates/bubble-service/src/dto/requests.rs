//! Request DTOs
//!
//! Bounds are enforced with `validator`; semantic checks that need
//! trimming or domain context happen in the services.

use serde::Deserialize;
use validator::Validate;

/// Create-bubble request (from multipart form fields)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBubbleRequest {
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be -90..90"))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be -180..180"))]
    pub lng: f64,

    #[validate(length(min = 1, max = 120, message = "Title must be 1-120 characters"))]
    pub title: String,

    #[validate(length(max = 1000, message = "Caption must be at most 1000 characters"))]
    pub caption: Option<String>,
}

/// Cast-vote request
#[derive(Debug, Clone, Deserialize)]
pub struct VoteRequest {
    /// 1 for upvote, -1 for downvote; everything else (including a
    /// missing field) is rejected downstream
    #[serde(default)]
    pub vote: i64,
}

/// Create-suggestion request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSuggestionRequest {
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
}
