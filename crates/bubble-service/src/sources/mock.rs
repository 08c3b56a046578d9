//! Mock event source
//!
//! Generates plausible events for a profile's venue roster: at most one
//! event per venue per cycle, a start time inside the profile's horizon,
//! and coordinates jittered a few meters so co-located events don't
//! stack. Venues are geocoded once per process and memoized; resolver
//! failures skip the venue rather than the whole source.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rand::Rng;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use bubble_core::{CandidateEvent, EventSource, SourceError, SourceResult, Venue, VenueResolver};

/// Coordinate jitter so multiple events at one venue don't overlap (±~10 m)
const COORD_JITTER_DEG: f64 = 0.0002;

/// Static description of one mock feed
#[derive(Debug, Clone, Copy)]
pub struct SourceProfile {
    /// Source tag recorded on imported bubbles
    pub name: &'static str,
    pub city: &'static str,
    pub event_url: &'static str,
    pub caption_suffix: &'static str,
    pub events_per_cycle: usize,
    /// Events start uniformly within this many hours from now
    pub horizon_hours: f64,
    pub min_duration_hours: f64,
    pub max_duration_hours: f64,
    pub venues: &'static [&'static str],
    pub kinds: &'static [&'static str],
}

/// A mock feed generating events over a geocoded venue roster
pub struct MockEventSource {
    profile: SourceProfile,
    resolver: Arc<dyn VenueResolver>,
    venues: OnceCell<Vec<Venue>>,
}

impl MockEventSource {
    /// Create a source for a profile, resolving venues through `resolver`
    pub fn new(profile: SourceProfile, resolver: Arc<dyn VenueResolver>) -> Self {
        Self {
            profile,
            resolver,
            venues: OnceCell::new(),
        }
    }

    /// Resolve the venue roster once and memoize it for the process
    /// lifetime; venues that fail to resolve are skipped
    async fn resolved_venues(&self) -> &[Venue] {
        self.venues
            .get_or_init(|| async {
                let mut resolved = Vec::new();
                for name in self.profile.venues {
                    match self.resolver.resolve(name, self.profile.city).await {
                        Ok(Some(venue)) => resolved.push(venue),
                        Ok(None) => {
                            warn!(source = self.profile.name, venue = name, "Venue not found");
                        }
                        Err(e) => {
                            warn!(source = self.profile.name, venue = name, error = %e,
                                "Failed to resolve venue");
                        }
                    }
                }
                info!(
                    source = self.profile.name,
                    venues = resolved.len(),
                    "Venue roster resolved"
                );
                resolved
            })
            .await
    }

    fn generate(&self, venues: &[Venue]) -> Vec<CandidateEvent> {
        let mut rng = rand::thread_rng();
        let now = Utc::now();
        let mut used = HashSet::new();
        let mut events = Vec::new();

        for _ in 0..self.profile.events_per_cycle {
            if used.len() >= venues.len() {
                break;
            }
            let idx = rng.gen_range(0..venues.len());
            if !used.insert(idx) {
                continue;
            }
            let venue = &venues[idx];
            let kind = self.profile.kinds[rng.gen_range(0..self.profile.kinds.len())];

            let start = now
                + Duration::milliseconds(
                    (rng.gen::<f64>() * self.profile.horizon_hours * 3_600_000.0) as i64,
                );
            let duration_hours = self.profile.min_duration_hours
                + rng.gen::<f64>()
                    * (self.profile.max_duration_hours - self.profile.min_duration_hours);
            let end = start + Duration::milliseconds((duration_hours * 3_600_000.0) as i64);

            events.push(CandidateEvent {
                title: format!("{kind} @ {}", venue.name),
                lat: venue.lat + (rng.gen::<f64>() - 0.5) * COORD_JITTER_DEG,
                lng: venue.lng + (rng.gen::<f64>() - 0.5) * COORD_JITTER_DEG,
                caption: Some(format!(
                    "{} • {}",
                    start.format("%a %b %e, %H:%M"),
                    self.profile.caption_suffix
                )),
                bot_source: self.profile.name.to_string(),
                event_url: Some(self.profile.event_url.to_string()),
                event_date: Some(start),
                event_end_date: Some(end),
            });
        }

        events
    }
}

#[async_trait]
impl EventSource for MockEventSource {
    fn name(&self) -> &str {
        self.profile.name
    }

    async fn fetch(&self) -> SourceResult<Vec<CandidateEvent>> {
        let venues = self.resolved_venues().await;
        if venues.is_empty() {
            return Err(SourceError::NoVenues);
        }
        Ok(self.generate(venues))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::catalog::EVENTBRITE;

    struct GridResolver;

    #[async_trait]
    impl VenueResolver for GridResolver {
        async fn resolve(&self, name: &str, _city: &str) -> SourceResult<Option<Venue>> {
            // Spread venues on a small grid around the city centre
            let offset = name.len() as f64 * 0.001;
            Ok(Some(Venue {
                name: name.to_string(),
                lat: 52.3676 + offset,
                lng: 4.9041 - offset,
            }))
        }
    }

    struct DeadResolver;

    #[async_trait]
    impl VenueResolver for DeadResolver {
        async fn resolve(&self, _name: &str, _city: &str) -> SourceResult<Option<Venue>> {
            Err(SourceError::Resolver("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_fetch_generates_bounded_batch() {
        let source = MockEventSource::new(EVENTBRITE, Arc::new(GridResolver));
        let events = source.fetch().await.unwrap();

        assert!(!events.is_empty());
        assert!(events.len() <= EVENTBRITE.events_per_cycle);
        for event in &events {
            assert_eq!(event.bot_source, "eventbrite");
            assert!(event.title.contains(" @ "));
            let (start, end) = (event.event_date.unwrap(), event.event_end_date.unwrap());
            assert!(end > start);
        }
    }

    #[tokio::test]
    async fn test_one_event_per_venue_per_cycle() {
        let source = MockEventSource::new(EVENTBRITE, Arc::new(GridResolver));
        let events = source.fetch().await.unwrap();

        let venues: HashSet<String> = events
            .iter()
            .map(|e| e.title.split(" @ ").nth(1).unwrap().to_string())
            .collect();
        assert_eq!(venues.len(), events.len());
    }

    #[tokio::test]
    async fn test_unresolvable_roster_is_a_source_error() {
        let source = MockEventSource::new(EVENTBRITE, Arc::new(DeadResolver));
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, SourceError::NoVenues));
    }
}
