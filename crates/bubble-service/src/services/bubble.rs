//! Bubble lifecycle service
//!
//! Creation, visibility, and the voting state machine. Every successful
//! mutation publishes a live event after it is committed.

use chrono::{DateTime, Utc};
use tracing::{info, instrument};
use validator::Validate;

use bubble_core::{Bubble, BubbleId, DomainError, Fingerprint, StoredMedia, VoteValue};
use bubble_gateway::LiveEvent;

use crate::dto::{BubbleResponse, CreateBubbleRequest, OwnVote, VoteReceipt};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Bubble service
pub struct BubbleService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BubbleService<'a> {
    /// Create a new BubbleService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List all bubbles currently visible on the map
    #[instrument(skip(self))]
    pub async fn list_visible(&self) -> ServiceResult<Vec<BubbleResponse>> {
        self.list_visible_at(Utc::now()).await
    }

    /// List bubbles visible at a given instant
    pub async fn list_visible_at(&self, now: DateTime<Utc>) -> ServiceResult<Vec<BubbleResponse>> {
        let bubbles = self
            .ctx
            .bubble_repo()
            .list_visible(now, self.ctx.lifecycle().retention())
            .await?;
        Ok(bubbles.iter().map(BubbleResponse::from).collect())
    }

    /// Create a user bubble
    #[instrument(skip(self, request, media, creator))]
    pub async fn create(
        &self,
        request: CreateBubbleRequest,
        media: Option<StoredMedia>,
        creator: Fingerprint,
    ) -> ServiceResult<BubbleResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e))?;
        let title = request.title.trim();
        if title.is_empty() {
            return Err(ServiceError::validation("Missing required fields"));
        }

        let caption = request
            .caption
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        let (media_url, media_type) = match media {
            Some(stored) => (Some(stored.url), Some(stored.media_type)),
            None => (None, None),
        };

        let bubble = Bubble::new_user(
            BubbleId::new(),
            request.lat,
            request.lng,
            title.to_string(),
            caption,
            media_url,
            media_type,
            creator,
            Utc::now(),
        );
        self.ctx.bubble_repo().create(&bubble).await?;

        info!(id = %bubble.id, title = %bubble.title, "Bubble created");

        let response = BubbleResponse::from(&bubble);
        self.ctx.hub().broadcast(&LiveEvent::new_bubble(&response));

        Ok(response)
    }

    /// Cast a vote on a bubble
    ///
    /// First vote applies its value; an opposite-direction vote replaces
    /// the stored one and moves the score by twice the value; a repeated
    /// same-direction vote is rejected. Creators cannot vote on their own
    /// bubbles.
    #[instrument(skip(self, voter))]
    pub async fn cast_vote(
        &self,
        id: BubbleId,
        voter: &Fingerprint,
        vote: i64,
    ) -> ServiceResult<VoteReceipt> {
        let value = VoteValue::from_value(vote).ok_or(DomainError::InvalidVote(vote))?;

        let bubble = self
            .ctx
            .bubble_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::BubbleNotFound(id))?;

        if bubble.creator_fingerprint == *voter {
            return Err(DomainError::SelfVote.into());
        }

        let new_score = self
            .ctx
            .vote_repo()
            .cast(id, voter, value, Utc::now())
            .await?;

        info!(id = %id, score = new_score, "Vote applied");

        if let Some(updated) = self.ctx.bubble_repo().find_by_id(id).await? {
            let response = BubbleResponse::from(&updated);
            self.ctx
                .hub()
                .broadcast(&LiveEvent::update_bubble(&response));
        }

        Ok(VoteReceipt {
            success: true,
            new_score,
            your_vote: value.value(),
        })
    }

    /// Fetch the caller's current vote on a bubble (0 if none)
    #[instrument(skip(self, voter))]
    pub async fn own_vote(&self, id: BubbleId, voter: &Fingerprint) -> ServiceResult<OwnVote> {
        let vote = self
            .ctx
            .vote_repo()
            .find(id, voter)
            .await?
            .map_or(0, |v| v.value.value());
        Ok(OwnVote { vote })
    }
}
