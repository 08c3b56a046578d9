//! Test fixtures - stub event sources with deterministic candidates

use async_trait::async_trait;
use chrono::{Duration, Utc};

use bubble_core::{CandidateEvent, EventSource, SourceError, SourceResult};

/// An event source that returns a fixed candidate list
pub struct StubSource {
    name: &'static str,
    candidates: Vec<CandidateEvent>,
}

impl StubSource {
    /// Two fixed events at well-known coordinates
    pub fn two_events() -> Self {
        Self {
            name: "eventbrite",
            candidates: vec![
                stub_candidate("DJ Set @ Paradiso", 52.3621, 4.8838),
                stub_candidate("Jazz Session @ Bimhuis", 52.3770, 4.9123),
            ],
        }
    }

    /// A source with custom candidates
    pub fn with_candidates(name: &'static str, candidates: Vec<CandidateEvent>) -> Self {
        Self { name, candidates }
    }
}

#[async_trait]
impl EventSource for StubSource {
    fn name(&self) -> &str {
        self.name
    }

    async fn fetch(&self) -> SourceResult<Vec<CandidateEvent>> {
        Ok(self.candidates.clone())
    }
}

/// An event source that always fails
pub struct FailingSource;

#[async_trait]
impl EventSource for FailingSource {
    fn name(&self) -> &str {
        "failing"
    }

    async fn fetch(&self) -> SourceResult<Vec<CandidateEvent>> {
        Err(SourceError::NoVenues)
    }
}

/// A candidate event starting a few hours from now
pub fn stub_candidate(title: &str, lat: f64, lng: f64) -> CandidateEvent {
    let start = Utc::now() + Duration::hours(6);
    CandidateEvent {
        title: title.to_string(),
        lat,
        lng,
        caption: Some("Upcoming event in Amsterdam".to_string()),
        bot_source: "eventbrite".to_string(),
        event_url: Some("https://www.eventbrite.com/".to_string()),
        event_date: Some(start),
        event_end_date: Some(start + Duration::hours(4)),
    }
}
