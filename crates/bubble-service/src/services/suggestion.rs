//! Suggestion board service
//!
//! A simpler sibling of the bubble engine: suggestions never expire and
//! their votes are a strict toggle rather than a score delta.

use chrono::Utc;
use tracing::{info, instrument};
use validator::Validate;

use bubble_core::{DomainError, Fingerprint, Suggestion, SuggestionId};
use bubble_gateway::LiveEvent;

use crate::dto::{
    CreateSuggestionRequest, SuggestionResponse, SuggestionVoteReceipt, SuggestionVoteStatus,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Minimum trimmed title length for a suggestion
const MIN_TITLE_LEN: usize = 5;

/// Suggestion service
pub struct SuggestionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SuggestionService<'a> {
    /// Create a new SuggestionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List all suggestions, most-voted first, recency breaking ties
    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<Vec<SuggestionResponse>> {
        let suggestions = self.ctx.suggestion_repo().list_ranked().await?;
        Ok(suggestions.iter().map(SuggestionResponse::from).collect())
    }

    /// Create a suggestion
    #[instrument(skip(self, request, creator))]
    pub async fn create(
        &self,
        request: CreateSuggestionRequest,
        creator: Fingerprint,
    ) -> ServiceResult<SuggestionResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e))?;

        let title = request.title.trim();
        if title.chars().count() < MIN_TITLE_LEN {
            return Err(ServiceError::validation(format!(
                "Title must be at least {MIN_TITLE_LEN} characters"
            )));
        }
        let description = request
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        let suggestion = Suggestion::new(
            SuggestionId::new(),
            title.to_string(),
            description,
            creator,
            Utc::now(),
        );
        self.ctx.suggestion_repo().create(&suggestion).await?;

        info!(id = %suggestion.id, "Suggestion created");

        let response = SuggestionResponse::from(&suggestion);
        self.ctx
            .hub()
            .broadcast(&LiveEvent::new_suggestion(&response));

        Ok(response)
    }

    /// Toggle the caller's vote on a suggestion
    #[instrument(skip(self, voter))]
    pub async fn toggle_vote(
        &self,
        id: SuggestionId,
        voter: &Fingerprint,
    ) -> ServiceResult<SuggestionVoteReceipt> {
        let outcome = self.ctx.suggestion_repo().toggle_vote(id, voter).await?;

        info!(id = %id, votes = outcome.votes, voted = outcome.voted, "Suggestion vote toggled");

        if let Some(updated) = self.ctx.suggestion_repo().find_by_id(id).await? {
            let response = SuggestionResponse::from(&updated);
            self.ctx
                .hub()
                .broadcast(&LiveEvent::update_suggestion(&response));
        }

        Ok(SuggestionVoteReceipt {
            success: true,
            votes: outcome.votes,
            voted: outcome.voted,
        })
    }

    /// Check whether the caller currently holds a vote on a suggestion
    #[instrument(skip(self, voter))]
    pub async fn vote_status(
        &self,
        id: SuggestionId,
        voter: &Fingerprint,
    ) -> ServiceResult<SuggestionVoteStatus> {
        // Existence check keeps 404 semantics consistent with toggling
        if self.ctx.suggestion_repo().find_by_id(id).await?.is_none() {
            return Err(DomainError::SuggestionNotFound(id).into());
        }
        let voted = self.ctx.suggestion_repo().has_voted(id, voter).await?;
        Ok(SuggestionVoteStatus { voted })
    }
}
