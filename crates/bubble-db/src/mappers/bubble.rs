//! Bubble entity <-> model mapper

use bubble_core::{Bubble, BubbleId, DomainError, Fingerprint, MediaType};

use crate::models::BubbleModel;

use super::millis_to_datetime;

impl TryFrom<BubbleModel> for Bubble {
    type Error = DomainError;

    fn try_from(model: BubbleModel) -> Result<Self, Self::Error> {
        let id = BubbleId::parse(&model.id)
            .map_err(|_| DomainError::Storage(format!("corrupt bubble id: {}", model.id)))?;

        let media_type = match model.media_type.as_deref() {
            Some(raw) => Some(MediaType::parse(raw).ok_or_else(|| {
                DomainError::Storage(format!("unknown media type: {raw}"))
            })?),
            None => None,
        };

        Ok(Bubble {
            id,
            lat: model.lat,
            lng: model.lng,
            title: model.title,
            caption: model.caption,
            media_url: model.media_url,
            media_type,
            score: model.score,
            created_at: millis_to_datetime(model.created_at)?,
            last_interaction: millis_to_datetime(model.last_interaction)?,
            creator_fingerprint: Fingerprint::from_raw(model.creator_fingerprint),
            bot_source: model.bot_source,
            event_url: model.event_url,
            event_date: model.event_date.map(millis_to_datetime).transpose()?,
            event_end_date: model.event_end_date.map(millis_to_datetime).transpose()?,
        })
    }
}
