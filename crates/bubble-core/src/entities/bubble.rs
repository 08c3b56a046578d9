//! Bubble entity - a geotagged, time-limited post
//!
//! A bubble is either user-created (`bot_source` is `None`) or imported
//! from an external event feed (`bot_source` carries the feed tag).
//! User bubbles stay visible while someone keeps interacting with them;
//! bot bubbles stay visible until their event ends.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{BubbleId, Fingerprint};

/// Coarse classification of attached media
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    Audio,
}

impl MediaType {
    /// Canonical lowercase tag, as stored and sent on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
        }
    }

    /// Parse the stored tag back into a media type
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "image" => Some(Self::Image),
            "video" => Some(Self::Video),
            "audio" => Some(Self::Audio),
            _ => None,
        }
    }

    /// Classify a lowercase file extension (without the dot)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "jpg" | "jpeg" | "png" | "gif" | "webp" => Some(Self::Image),
            "mp4" | "webm" | "mov" => Some(Self::Video),
            "mp3" | "wav" | "ogg" => Some(Self::Audio),
            _ => None,
        }
    }
}

/// Bubble entity
#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    pub id: BubbleId,
    pub lat: f64,
    pub lng: f64,
    pub title: String,
    pub caption: Option<String>,
    pub media_url: Option<String>,
    pub media_type: Option<MediaType>,
    pub score: i64,
    pub created_at: DateTime<Utc>,
    pub last_interaction: DateTime<Utc>,
    pub creator_fingerprint: Fingerprint,
    pub bot_source: Option<String>,
    pub event_url: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub event_end_date: Option<DateTime<Utc>>,
}

impl Bubble {
    /// Create a new user bubble
    #[allow(clippy::too_many_arguments)]
    pub fn new_user(
        id: BubbleId,
        lat: f64,
        lng: f64,
        title: String,
        caption: Option<String>,
        media_url: Option<String>,
        media_type: Option<MediaType>,
        creator: Fingerprint,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            lat,
            lng,
            title,
            caption,
            media_url,
            media_type,
            score: 0,
            created_at: now,
            last_interaction: now,
            creator_fingerprint: creator,
            bot_source: None,
            event_url: None,
            event_date: None,
            event_end_date: None,
        }
    }

    /// Create a new bot-imported bubble, attributed to the bot sentinel
    #[allow(clippy::too_many_arguments)]
    pub fn new_bot(
        id: BubbleId,
        lat: f64,
        lng: f64,
        title: String,
        caption: Option<String>,
        source: String,
        event_url: Option<String>,
        event_date: Option<DateTime<Utc>>,
        event_end_date: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            lat,
            lng,
            title,
            caption,
            media_url: None,
            media_type: None,
            score: 0,
            created_at: now,
            last_interaction: now,
            creator_fingerprint: Fingerprint::bot(),
            bot_source: Some(source),
            event_url,
            event_date,
            event_end_date,
        }
    }

    /// Check if this bubble was imported from an event feed
    #[inline]
    pub fn is_bot(&self) -> bool {
        self.bot_source.is_some()
    }

    /// Visibility at a given instant
    ///
    /// User bubbles: visible while the last interaction is within the
    /// retention window. Bot bubbles: visible until the event ends
    /// (forever, if no end date).
    pub fn is_visible_at(&self, now: DateTime<Utc>, retention: Duration) -> bool {
        if self.is_bot() {
            self.event_end_date.is_none_or(|end| end > now)
        } else {
            self.last_interaction > now - retention
        }
    }
}
