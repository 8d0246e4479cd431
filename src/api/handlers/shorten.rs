//! Handler for the shorten endpoint.

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::api::middleware::Owner;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL owned by the authenticated caller.
///
/// # Endpoint
///
/// `POST /api/url/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "originalUrl": "https://example.com",
///   "customSlug": "my-link",   // optional
///   "expiresInDays": 7         // optional, number or numeric string
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "id": "5f0c1c9e-1f7e-4d8e-a7d1-0b9e5c1f2a3b",
///   "slug": "my-link",
///   "shortUrl": "https://s.example.com/my-link",
///   "expiresAt": "2026-10-25T12:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for a malformed body, an invalid URL, slug or
/// expiration, or a slug that is already taken.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Extension(Owner(owner_id)): Extension<Owner>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let record = state
        .url_service
        .shorten(payload.into_input(owner_id)?)
        .await?;

    let short_url = state.url_service.short_url(&record.slug);

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            id: record.id,
            slug: record.slug,
            short_url,
            expires_at: record.expires_at,
        }),
    ))
}
