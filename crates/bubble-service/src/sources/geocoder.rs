//! Nominatim venue resolver
//!
//! Resolves venue names through the OpenStreetMap Nominatim search API.
//! Results (including misses) are cached per venue, and live lookups are
//! paced ~1.1 s apart to respect Nominatim's one-request-per-second rule.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Deserialize;
use tracing::{debug, warn};

use bubble_core::{SourceError, SourceResult, Venue, VenueResolver};

/// Nominatim requires an identifying User-Agent
const USER_AGENT: &str = "bubblemap/1.0";

/// Pause between live lookups (Nominatim allows 1 req/sec)
const LOOKUP_PACE: Duration = Duration::from_millis(1100);

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct NominatimHit {
    lat: String,
    lon: String,
}

/// Venue resolver backed by OpenStreetMap Nominatim
pub struct NominatimResolver {
    client: reqwest::Client,
    base_url: String,
    cache: Mutex<HashMap<String, Option<Venue>>>,
}

impl NominatimResolver {
    /// Create a resolver against the given Nominatim base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            cache: Mutex::new(HashMap::new()),
        })
    }
}

#[async_trait]
impl VenueResolver for NominatimResolver {
    async fn resolve(&self, name: &str, city: &str) -> SourceResult<Option<Venue>> {
        let key = format!("{name}, {city}");
        if let Some(cached) = self.cache.lock().get(&key).cloned() {
            return Ok(cached);
        }

        tokio::time::sleep(LOOKUP_PACE).await;

        let url = format!("{}/search", self.base_url);
        let hits: Vec<NominatimHit> = self
            .client
            .get(&url)
            .query(&[("q", key.as_str()), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| SourceError::Resolver(e.to_string()))?
            .json()
            .await
            .map_err(|e| SourceError::Resolver(e.to_string()))?;

        let venue = hits.first().and_then(|hit| {
            let lat = hit.lat.parse().ok()?;
            let lng = hit.lon.parse().ok()?;
            Some(Venue {
                name: name.to_string(),
                lat,
                lng,
            })
        });

        match &venue {
            Some(v) => debug!(venue = name, lat = v.lat, lng = v.lng, "Venue geocoded"),
            None => warn!(venue = name, "No location found"),
        }

        self.cache.lock().insert(key, venue.clone());
        Ok(venue)
    }
}
