//! Distant-bubble purge
//!
//! Removes user bubbles dropped far outside the service area (stray test
//! pins, GPS glitches). Bot bubbles are left alone since their venues are
//! resolved within the city anyway.

use tracing::{info, instrument};

use bubble_core::distance_km;
use bubble_gateway::LiveEvent;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Distant-bubble purge service
pub struct PurgeService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PurgeService<'a> {
    /// Create a new PurgeService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Delete every user bubble outside the configured radius; returns the
    /// number removed
    #[instrument(skip(self))]
    pub async fn run(&self) -> ServiceResult<u64> {
        let map = self.ctx.map().clone();
        let bubbles = self.ctx.bubble_repo().list_user_bubbles().await?;

        let mut deleted = 0;
        for bubble in bubbles {
            let distance = distance_km(map.center_lat, map.center_lng, bubble.lat, bubble.lng);
            if distance > map.max_radius_km {
                self.ctx.bubble_repo().delete(bubble.id).await?;
                deleted += 1;
                info!(
                    id = %bubble.id,
                    title = %bubble.title,
                    distance_km = %format!("{distance:.0}"),
                    "Removed distant bubble"
                );
            }
        }

        if deleted > 0 {
            self.ctx.hub().broadcast(&LiveEvent::Cleanup);
        }

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::CreateBubbleRequest;
    use crate::services::testing::test_context;
    use crate::services::BubbleService;
    use bubble_core::Fingerprint;

    fn creator() -> Fingerprint {
        Fingerprint::derive("1.1.1.1", "creator", "en", "")
    }

    async fn create_at(ctx: &crate::services::ServiceContext, lat: f64, lng: f64, title: &str) {
        BubbleService::new(ctx)
            .create(
                CreateBubbleRequest {
                    lat,
                    lng,
                    title: title.to_string(),
                    caption: None,
                },
                None,
                creator(),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_purge_removes_only_distant_user_bubbles() {
        let ctx = test_context().await;

        // In Amsterdam and in Paris (~430 km away)
        create_at(&ctx, 52.3676, 4.9041, "Local").await;
        create_at(&ctx, 48.8566, 2.3522, "Distant").await;

        let deleted = PurgeService::new(&ctx).run().await.unwrap();
        assert_eq!(deleted, 1);

        let remaining = ctx.bubble_repo().list_user_bubbles().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].title, "Local");
    }

    #[tokio::test]
    async fn test_purge_broadcasts_cleanup_only_when_needed() {
        let ctx = test_context().await;
        create_at(&ctx, 52.3676, 4.9041, "Local").await;

        let (_viewer, mut rx) = ctx.hub().register();
        let deleted = PurgeService::new(&ctx).run().await.unwrap();
        assert_eq!(deleted, 0);
        assert!(rx.try_recv().is_err());
    }
}
