//! Entity -> response DTO mappers

use bubble_core::{Bubble, MediaType, Suggestion};

use super::responses::{BubbleResponse, SuggestionResponse};

impl From<&Bubble> for BubbleResponse {
    fn from(bubble: &Bubble) -> Self {
        Self {
            id: bubble.id.to_string(),
            lat: bubble.lat,
            lng: bubble.lng,
            title: bubble.title.clone(),
            caption: bubble.caption.clone(),
            media_url: bubble.media_url.clone(),
            media_type: bubble.media_type.map(MediaType::as_str),
            score: bubble.score,
            created_at: bubble.created_at.timestamp_millis(),
            last_interaction: bubble.last_interaction.timestamp_millis(),
            bot_source: bubble.bot_source.clone(),
            event_url: bubble.event_url.clone(),
            event_date: bubble.event_date.map(|d| d.timestamp_millis()),
            event_end_date: bubble.event_end_date.map(|d| d.timestamp_millis()),
        }
    }
}

impl From<&Suggestion> for SuggestionResponse {
    fn from(suggestion: &Suggestion) -> Self {
        Self {
            id: suggestion.id.to_string(),
            title: suggestion.title.clone(),
            description: suggestion.description.clone(),
            votes: suggestion.votes,
            created_at: suggestion.created_at.timestamp_millis(),
        }
    }
}
