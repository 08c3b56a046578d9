//! Expiry sweep
//!
//! Periodically removes user bubbles past the retention window and bot
//! bubbles whose event has ended, cascading their votes. One `cleanup`
//! event is broadcast per sweep that removed anything, never per row.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{error, info, instrument};

use bubble_core::SweepStats;
use bubble_gateway::LiveEvent;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Expiry sweep service
pub struct SweepService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SweepService<'a> {
    /// Create a new SweepService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Run one sweep against the current wall clock
    pub async fn run_once(&self) -> ServiceResult<SweepStats> {
        self.run_at(Utc::now()).await
    }

    /// Run one sweep as if the time were `now`
    #[instrument(skip(self))]
    pub async fn run_at(&self, now: DateTime<Utc>) -> ServiceResult<SweepStats> {
        let stats = self
            .ctx
            .bubble_repo()
            .delete_expired(now, self.ctx.lifecycle().retention())
            .await?;

        if stats.total() > 0 {
            info!(
                user_expired = stats.user_expired,
                bot_expired = stats.bot_expired,
                "Cleaned up expired bubbles"
            );
            self.ctx.hub().broadcast(&LiveEvent::Cleanup);
        }

        Ok(stats)
    }
}

/// Spawn the periodic sweep task
pub fn spawn_sweep(ctx: ServiceContext, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if let Err(e) = SweepService::new(&ctx).run_once().await {
                error!(error = %e, "Expiry sweep failed");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::CreateBubbleRequest;
    use crate::services::testing::test_context;
    use crate::services::BubbleService;
    use bubble_core::{BubbleId, Fingerprint};
    use chrono::Duration as ChronoDuration;

    fn request() -> CreateBubbleRequest {
        CreateBubbleRequest {
            lat: 52.37,
            lng: 4.90,
            title: "Test".to_string(),
            caption: None,
        }
    }

    fn creator() -> Fingerprint {
        Fingerprint::derive("1.1.1.1", "creator", "en", "")
    }

    #[tokio::test]
    async fn test_untouched_bubble_expires_after_retention() {
        let ctx = test_context().await;
        let bubbles = BubbleService::new(&ctx);
        let sweep = SweepService::new(&ctx);

        let created = bubbles.create(request(), None, creator()).await.unwrap();
        let id = BubbleId::parse(&created.id).unwrap();
        let t0 = Utc::now();

        // Within the window: nothing happens
        let stats = sweep.run_at(t0 + ChronoDuration::hours(23)).await.unwrap();
        assert_eq!(stats.total(), 0);

        // Past the window: removed, with its votes
        let stats = sweep.run_at(t0 + ChronoDuration::hours(25)).await.unwrap();
        assert_eq!(stats.user_expired, 1);
        assert!(ctx.bubble_repo().find_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_vote_refreshes_the_clock() {
        let ctx = test_context().await;
        let bubbles = BubbleService::new(&ctx);
        let sweep = SweepService::new(&ctx);

        let created = bubbles.create(request(), None, creator()).await.unwrap();
        let id = BubbleId::parse(&created.id).unwrap();
        let t0 = Utc::now();

        // A vote 20 hours in keeps the bubble alive past the original window
        let voter = Fingerprint::derive("2.2.2.2", "voter", "en", "");
        ctx.vote_repo()
            .cast(id, &voter, bubble_core::VoteValue::Up, t0 + ChronoDuration::hours(20))
            .await
            .unwrap();

        let stats = sweep.run_at(t0 + ChronoDuration::hours(25)).await.unwrap();
        assert_eq!(stats.total(), 0);
        assert!(ctx.bubble_repo().find_by_id(id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_sweep_broadcasts_single_cleanup() {
        let ctx = test_context().await;
        let bubbles = BubbleService::new(&ctx);
        let sweep = SweepService::new(&ctx);

        for _ in 0..3 {
            bubbles.create(request(), None, creator()).await.unwrap();
        }
        let (_viewer, mut rx) = ctx.hub().register();

        sweep
            .run_at(Utc::now() + ChronoDuration::hours(25))
            .await
            .unwrap();

        let message = rx.recv().await.unwrap();
        assert_eq!(message, r#"{"type":"cleanup"}"#);
        // One event for the whole sweep, not one per bubble
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_empty_sweep_broadcasts_nothing() {
        let ctx = test_context().await;
        let sweep = SweepService::new(&ctx);
        let (_viewer, mut rx) = ctx.hub().register();

        sweep.run_once().await.unwrap();
        assert!(rx.try_recv().is_err());
    }
}
