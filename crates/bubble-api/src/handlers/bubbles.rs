//! Bubble handlers
//!
//! Endpoints for listing bubbles, dropping new ones (multipart, with an
//! optional media attachment), and voting.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use bubble_core::{BubbleId, DomainError};
use bubble_service::{
    BubbleResponse, BubbleService, CreateBubbleRequest, OwnVote, VoteReceipt, VoteRequest,
};

use crate::extractors::ClientIdentity;
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// List visible bubbles
///
/// GET /api/bubbles
pub async fn list_bubbles(State(state): State<AppState>) -> ApiResult<Json<Vec<BubbleResponse>>> {
    let service = BubbleService::new(state.service_context());
    let bubbles = service.list_visible().await?;
    Ok(Json(bubbles))
}

/// Create a bubble from multipart form data
///
/// POST /api/bubbles
/// Fields: lat, lng, title, caption (optional), media (optional file)
pub async fn create_bubble(
    State(state): State<AppState>,
    ClientIdentity(fingerprint): ClientIdentity,
    mut multipart: Multipart,
) -> ApiResult<Json<BubbleResponse>> {
    let mut lat = None;
    let mut lng = None;
    let mut title = None;
    let mut caption = None;
    let mut media_part: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::invalid_body(e.to_string()))?
    {
        match field.name().unwrap_or("") {
            "lat" => lat = Some(parse_coordinate(field, "lat").await?),
            "lng" => lng = Some(parse_coordinate(field, "lng").await?),
            "title" => title = Some(read_text(field).await?),
            "caption" => caption = Some(read_text(field).await?),
            "media" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::invalid_body(e.to_string()))?;
                if !bytes.is_empty() {
                    media_part = Some((filename, bytes.to_vec()));
                }
            }
            _ => {}
        }
    }

    let (Some(lat), Some(lng), Some(title)) = (lat, lng, title) else {
        return Err(DomainError::validation("Missing required fields").into());
    };

    let media = match media_part {
        Some((filename, bytes)) => Some(state.media_store().store(&filename, &bytes).await?),
        None => None,
    };

    let service = BubbleService::new(state.service_context());
    let bubble = service
        .create(
            CreateBubbleRequest {
                lat,
                lng,
                title,
                caption,
            },
            media,
            fingerprint,
        )
        .await?;
    Ok(Json(bubble))
}

/// Cast a vote on a bubble
///
/// POST /api/bubbles/{bubble_id}/vote
pub async fn cast_vote(
    State(state): State<AppState>,
    ClientIdentity(fingerprint): ClientIdentity,
    Path(bubble_id): Path<String>,
    Json(request): Json<VoteRequest>,
) -> ApiResult<Json<VoteReceipt>> {
    let bubble_id = parse_bubble_id(&bubble_id)?;

    let service = BubbleService::new(state.service_context());
    let receipt = service
        .cast_vote(bubble_id, &fingerprint, request.vote)
        .await?;
    Ok(Json(receipt))
}

/// Fetch the caller's own vote on a bubble
///
/// GET /api/bubbles/{bubble_id}/vote
pub async fn own_vote(
    State(state): State<AppState>,
    ClientIdentity(fingerprint): ClientIdentity,
    Path(bubble_id): Path<String>,
) -> ApiResult<Json<OwnVote>> {
    let bubble_id = parse_bubble_id(&bubble_id)?;

    let service = BubbleService::new(state.service_context());
    let vote = service.own_vote(bubble_id, &fingerprint).await?;
    Ok(Json(vote))
}

fn parse_bubble_id(raw: &str) -> Result<BubbleId, ApiError> {
    BubbleId::parse(raw).map_err(|_| ApiError::invalid_path("Invalid bubble_id format"))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::invalid_body(e.to_string()))
}

async fn parse_coordinate(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<f64, ApiError> {
    read_text(field)
        .await?
        .trim()
        .parse()
        .map_err(|_| DomainError::validation(format!("Invalid {name}")).into())
}
