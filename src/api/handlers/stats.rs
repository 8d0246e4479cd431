//! Handler for per-slug click statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the click count of a slug.
///
/// # Endpoint
///
/// `GET /api/url/stats/{slug}`
///
/// Public; reading stats never changes the counter.
///
/// # Errors
///
/// Returns 404 Not Found if the slug doesn't exist.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    let stats = state.url_service.stats(&slug).await?;
    Ok(Json(stats.into()))
}
