//! Operational endpoints
//!
//! Manual triggers for the importer and the distant-bubble purge.

use axum::{extract::State, Json};
use bubble_service::{PurgeResponse, PurgeService, ScrapeResponse};

use crate::response::ApiResult;
use crate::state::AppState;

/// Run one import cycle now
///
/// POST /api/scrape
pub async fn run_scrapers(State(state): State<AppState>) -> ApiResult<Json<ScrapeResponse>> {
    let report = state.importer().run_once().await;
    Ok(Json(ScrapeResponse {
        success: true,
        imported: report.imported,
    }))
}

/// Remove user bubbles far outside the service area
///
/// POST /api/cleanup
pub async fn purge_distant(State(state): State<AppState>) -> ApiResult<Json<PurgeResponse>> {
    let service = PurgeService::new(state.service_context());
    let deleted = service.run().await?;
    Ok(Json(PurgeResponse {
        success: true,
        deleted,
    }))
}
