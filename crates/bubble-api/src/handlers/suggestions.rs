//! Suggestion board handlers

use axum::{
    extract::{Path, State},
    Json,
};
use bubble_core::SuggestionId;
use bubble_service::{
    CreateSuggestionRequest, SuggestionResponse, SuggestionService, SuggestionVoteReceipt,
    SuggestionVoteStatus,
};

use crate::extractors::{ClientIdentity, ValidatedJson};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// List suggestions, most-voted first
///
/// GET /api/suggestions
pub async fn list_suggestions(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<SuggestionResponse>>> {
    let service = SuggestionService::new(state.service_context());
    let suggestions = service.list().await?;
    Ok(Json(suggestions))
}

/// Create a suggestion
///
/// POST /api/suggestions
pub async fn create_suggestion(
    State(state): State<AppState>,
    ClientIdentity(fingerprint): ClientIdentity,
    ValidatedJson(request): ValidatedJson<CreateSuggestionRequest>,
) -> ApiResult<Json<SuggestionResponse>> {
    let service = SuggestionService::new(state.service_context());
    let suggestion = service.create(request, fingerprint).await?;
    Ok(Json(suggestion))
}

/// Toggle the caller's vote on a suggestion
///
/// POST /api/suggestions/{suggestion_id}/vote
pub async fn toggle_vote(
    State(state): State<AppState>,
    ClientIdentity(fingerprint): ClientIdentity,
    Path(suggestion_id): Path<String>,
) -> ApiResult<Json<SuggestionVoteReceipt>> {
    let suggestion_id = parse_suggestion_id(&suggestion_id)?;

    let service = SuggestionService::new(state.service_context());
    let receipt = service.toggle_vote(suggestion_id, &fingerprint).await?;
    Ok(Json(receipt))
}

/// Check whether the caller voted on a suggestion
///
/// GET /api/suggestions/{suggestion_id}/vote
pub async fn vote_status(
    State(state): State<AppState>,
    ClientIdentity(fingerprint): ClientIdentity,
    Path(suggestion_id): Path<String>,
) -> ApiResult<Json<SuggestionVoteStatus>> {
    let suggestion_id = parse_suggestion_id(&suggestion_id)?;

    let service = SuggestionService::new(state.service_context());
    let status = service.vote_status(suggestion_id, &fingerprint).await?;
    Ok(Json(status))
}

fn parse_suggestion_id(raw: &str) -> Result<SuggestionId, ApiError> {
    SuggestionId::parse(raw).map_err(|_| ApiError::invalid_path("Invalid suggestion_id format"))
}
