//! Bot content importer
//!
//! Pulls candidate events from each configured source, skips candidates
//! that duplicate an existing bot bubble (same title and source, within a
//! small coordinate epsilon), and inserts the rest attributed to the bot
//! sentinel identity. A failing source never aborts the cycle: its error
//! is logged and the remaining sources still run.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep, timeout};
use tracing::{info, instrument, warn};

use bubble_common::ImporterConfig;
use bubble_core::{Bubble, BubbleId, CandidateEvent, EventSource};
use bubble_gateway::LiveEvent;

use crate::dto::BubbleResponse;

use super::context::ServiceContext;

/// Outcome of one import cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Bubbles inserted
    pub imported: u64,
    /// Candidates skipped as duplicates
    pub skipped: u64,
    /// Sources that failed or timed out
    pub failed_sources: u64,
}

/// Bot content importer
pub struct Importer {
    ctx: ServiceContext,
    sources: Vec<Arc<dyn EventSource>>,
    config: ImporterConfig,
}

impl Importer {
    /// Create a new Importer over the given sources
    pub fn new(
        ctx: ServiceContext,
        sources: Vec<Arc<dyn EventSource>>,
        config: ImporterConfig,
    ) -> Self {
        Self {
            ctx,
            sources,
            config,
        }
    }

    /// Run one import cycle across all sources
    ///
    /// Per-source and per-candidate failures are logged and skipped;
    /// partial success is the expected normal outcome.
    #[instrument(skip(self))]
    pub async fn run_once(&self) -> ImportReport {
        let mut report = ImportReport::default();

        for source in &self.sources {
            let name = source.name().to_string();
            let fetched = timeout(self.config.source_timeout(), source.fetch()).await;

            let candidates = match fetched {
                Ok(Ok(candidates)) => candidates,
                Ok(Err(e)) => {
                    warn!(source = %name, error = %e, "Source failed, skipping");
                    report.failed_sources += 1;
                    continue;
                }
                Err(_) => {
                    warn!(source = %name, "Source timed out, skipping");
                    report.failed_sources += 1;
                    continue;
                }
            };

            for candidate in candidates {
                match self.import_candidate(&candidate).await {
                    Ok(true) => report.imported += 1,
                    Ok(false) => report.skipped += 1,
                    Err(e) => {
                        warn!(source = %name, title = %candidate.title, error = %e,
                            "Failed to import event");
                    }
                }
            }
        }

        info!(
            imported = report.imported,
            skipped = report.skipped,
            failed_sources = report.failed_sources,
            "Import cycle finished"
        );
        report
    }

    /// Import a single candidate unless it duplicates an existing bot
    /// bubble; returns whether a bubble was inserted
    async fn import_candidate(
        &self,
        candidate: &CandidateEvent,
    ) -> Result<bool, bubble_core::DomainError> {
        let duplicate = self
            .ctx
            .bubble_repo()
            .bot_duplicate_exists(
                &candidate.title,
                &candidate.bot_source,
                candidate.lat,
                candidate.lng,
                self.config.dedup_epsilon_deg,
            )
            .await?;
        if duplicate {
            return Ok(false);
        }

        let bubble = Bubble::new_bot(
            BubbleId::new(),
            candidate.lat,
            candidate.lng,
            candidate.title.clone(),
            candidate.caption.clone(),
            candidate.bot_source.clone(),
            candidate.event_url.clone(),
            candidate.event_date,
            candidate.event_end_date,
            Utc::now(),
        );
        self.ctx.bubble_repo().create(&bubble).await?;

        info!(source = %candidate.bot_source, title = %candidate.title, "Added bot event");

        let response = BubbleResponse::from(&bubble);
        self.ctx.hub().broadcast(&LiveEvent::new_bubble(&response));

        Ok(true)
    }

    /// Spawn the periodic import task: one delayed run shortly after
    /// startup, then one per interval
    pub fn spawn(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move {
            sleep(self.config.startup_delay()).await;
            self.run_once().await;

            let mut ticker = interval(self.config.interval());
            ticker.tick().await;
            loop {
                ticker.tick().await;
                self.run_once().await;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::test_context;
    use async_trait::async_trait;
    use bubble_common::AppConfig;
    use bubble_core::{SourceError, SourceResult};
    use chrono::Duration as ChronoDuration;

    struct FixedSource {
        name: &'static str,
        candidates: Vec<CandidateEvent>,
    }

    #[async_trait]
    impl EventSource for FixedSource {
        fn name(&self) -> &str {
            self.name
        }

        async fn fetch(&self) -> SourceResult<Vec<CandidateEvent>> {
            Ok(self.candidates.clone())
        }
    }

    struct BrokenSource;

    #[async_trait]
    impl EventSource for BrokenSource {
        fn name(&self) -> &str {
            "broken"
        }

        async fn fetch(&self) -> SourceResult<Vec<CandidateEvent>> {
            Err(SourceError::NoVenues)
        }
    }

    fn candidate(title: &str, lat: f64, lng: f64) -> CandidateEvent {
        let start = Utc::now() + ChronoDuration::hours(4);
        CandidateEvent {
            title: title.to_string(),
            lat,
            lng,
            caption: Some("Upcoming event".to_string()),
            bot_source: "eventbrite".to_string(),
            event_url: Some("https://www.eventbrite.com/".to_string()),
            event_date: Some(start),
            event_end_date: Some(start + ChronoDuration::hours(3)),
        }
    }

    fn importer(ctx: &crate::services::ServiceContext, sources: Vec<Arc<dyn EventSource>>) -> Importer {
        Importer::new(ctx.clone(), sources, AppConfig::default().importer)
    }

    #[tokio::test]
    async fn test_import_inserts_bot_bubbles() {
        let ctx = test_context().await;
        let source = Arc::new(FixedSource {
            name: "eventbrite",
            candidates: vec![candidate("DJ Set @ Paradiso", 52.3621, 4.8838)],
        });

        let report = importer(&ctx, vec![source]).run_once().await;
        assert_eq!(report.imported, 1);

        let bubbles = ctx
            .bubble_repo()
            .list_visible(Utc::now(), ChronoDuration::hours(24))
            .await
            .unwrap();
        assert_eq!(bubbles.len(), 1);
        assert!(bubbles[0].is_bot());
        assert!(bubbles[0].creator_fingerprint.is_bot());
    }

    #[tokio::test]
    async fn test_reimport_is_deduplicated() {
        let ctx = test_context().await;
        let imp = importer(
            &ctx,
            vec![Arc::new(FixedSource {
                name: "eventbrite",
                candidates: vec![candidate("DJ Set @ Paradiso", 52.3621, 4.8838)],
            })],
        );

        let first = imp.run_once().await;
        assert_eq!(first.imported, 1);

        let second = imp.run_once().await;
        assert_eq!(second.imported, 0);
        assert_eq!(second.skipped, 1);

        let bubbles = ctx
            .bubble_repo()
            .list_visible(Utc::now(), ChronoDuration::hours(24))
            .await
            .unwrap();
        assert_eq!(bubbles.len(), 1);
    }

    #[tokio::test]
    async fn test_nearby_coordinates_count_as_duplicate() {
        let ctx = test_context().await;
        let first = importer(
            &ctx,
            vec![Arc::new(FixedSource {
                name: "eventbrite",
                candidates: vec![candidate("DJ Set @ Paradiso", 52.3621, 4.8838)],
            })],
        );
        first.run_once().await;

        // Same event jittered ~50 m is still the same event
        let second = importer(
            &ctx,
            vec![Arc::new(FixedSource {
                name: "eventbrite",
                candidates: vec![candidate("DJ Set @ Paradiso", 52.3625, 4.8842)],
            })],
        );
        let report = second.run_once().await;
        assert_eq!(report.imported, 0);
        assert_eq!(report.skipped, 1);
    }

    #[tokio::test]
    async fn test_failing_source_does_not_abort_cycle() {
        let ctx = test_context().await;
        let report = importer(
            &ctx,
            vec![
                Arc::new(BrokenSource),
                Arc::new(FixedSource {
                    name: "community",
                    candidates: vec![candidate("Tech Meetup @ Impact Hub", 52.37, 4.89)],
                }),
            ],
        )
        .run_once()
        .await;

        assert_eq!(report.failed_sources, 1);
        assert_eq!(report.imported, 1);
    }

    #[tokio::test]
    async fn test_each_import_broadcasts_new_bubble() {
        let ctx = test_context().await;
        let (_viewer, mut rx) = ctx.hub().register();

        importer(
            &ctx,
            vec![Arc::new(FixedSource {
                name: "eventbrite",
                candidates: vec![
                    candidate("DJ Set @ Paradiso", 52.3621, 4.8838),
                    candidate("Jazz Session @ Bimhuis", 52.3770, 4.9123),
                ],
            })],
        )
        .run_once()
        .await;

        for _ in 0..2 {
            let message = rx.recv().await.unwrap();
            let wire: serde_json::Value = serde_json::from_str(&message).unwrap();
            assert_eq!(wire["type"], "new_bubble");
            assert_eq!(wire["bubble"]["bot_source"], "eventbrite");
        }
    }
}
