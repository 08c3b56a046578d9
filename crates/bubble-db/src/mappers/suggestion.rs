//! Suggestion entity <-> model mapper

use bubble_core::{DomainError, Fingerprint, Suggestion, SuggestionId};

use crate::models::SuggestionModel;

use super::millis_to_datetime;

impl TryFrom<SuggestionModel> for Suggestion {
    type Error = DomainError;

    fn try_from(model: SuggestionModel) -> Result<Self, Self::Error> {
        let id = SuggestionId::parse(&model.id)
            .map_err(|_| DomainError::Storage(format!("corrupt suggestion id: {}", model.id)))?;

        Ok(Suggestion {
            id,
            title: model.title,
            description: model.description,
            votes: model.votes,
            created_at: millis_to_datetime(model.created_at)?,
            creator_fingerprint: Fingerprint::from_raw(model.creator_fingerprint),
        })
    }
}
