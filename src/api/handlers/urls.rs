//! Handlers for owner-scoped URL management (list, rename, delete).

use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
};
use validator::Validate;

use crate::api::dto::update_slug::{UpdateSlugRequest, UpdateSlugResponse};
use crate::api::dto::url::{MessageResponse, UrlResponse};
use crate::api::middleware::Owner;
use crate::error::AppError;
use crate::state::AppState;

/// Lists every URL created by the caller, newest first.
///
/// # Endpoint
///
/// `GET /api/url`
pub async fn list_urls_handler(
    State(state): State<AppState>,
    Extension(Owner(owner_id)): Extension<Owner>,
) -> Result<Json<Vec<UrlResponse>>, AppError> {
    let base_url = state.url_service.base_url();

    let items = state
        .url_service
        .list_owned(owner_id)
        .await?
        .into_iter()
        .map(|record| UrlResponse::from_record(record, base_url))
        .collect();

    Ok(Json(items))
}

/// Renames the slug of a URL owned by the caller.
///
/// # Endpoint
///
/// `PUT /api/url/update-slug/{id}`
///
/// # Request Body
///
/// ```json
/// { "newSlug": "better-name" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "message": "Slug updated successfully",
///   "updatedUrl": { "id": "...", "slug": "better-name", "shortUrl": "https://s.example.com/better-name", ... }
/// }
/// ```
///
/// # Errors
///
/// - 400 for a malformed body, bad slug format, taken slug or malformed id
/// - 403 if the caller does not own the URL
/// - 404 if no URL has this id
pub async fn update_slug_handler(
    State(state): State<AppState>,
    Extension(Owner(owner_id)): Extension<Owner>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateSlugRequest>, JsonRejection>,
) -> Result<Json<UpdateSlugResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let record = state
        .url_service
        .update_slug(&id, owner_id, &payload.new_slug)
        .await?;

    Ok(Json(UpdateSlugResponse {
        message: "Slug updated successfully",
        updated_url: UrlResponse::from_record(record, state.url_service.base_url()),
    }))
}

/// Permanently deletes a URL owned by the caller.
///
/// # Endpoint
///
/// `DELETE /api/url/{id}`
///
/// # Errors
///
/// - 400 if the id is malformed
/// - 403 if the caller does not own the URL
/// - 404 if no URL has this id
pub async fn delete_url_handler(
    State(state): State<AppState>,
    Extension(Owner(owner_id)): Extension<Owner>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.url_service.delete(&id, owner_id).await?;

    Ok(Json(MessageResponse {
        message: "URL deleted successfully.",
    }))
}
