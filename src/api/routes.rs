//! API route configuration.
//!
//! Routes are split by protection level so the top-level router can attach
//! authentication and rate limiting to exactly the endpoints that need them.

use crate::api::handlers::{
    delete_url_handler, list_urls_handler, shorten_handler, stats_handler, update_slug_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post, put},
};

/// Shorten endpoint. Requires Bearer authentication and is rate limited.
///
/// - `POST /url/shorten` - Create a short URL
pub fn shorten_routes() -> Router<AppState> {
    Router::new().route("/url/shorten", post(shorten_handler))
}

/// Owner-scoped endpoints, protected by Bearer token authentication.
///
/// - `GET    /url`                  - List the caller's URLs
/// - `PUT    /url/update-slug/{id}` - Rename a slug
/// - `DELETE /url/{id}`             - Delete a URL
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/url", get(list_urls_handler))
        .route("/url/update-slug/{id}", put(update_slug_handler))
        .route("/url/{id}", delete(delete_url_handler))
}

/// Public API endpoints.
///
/// - `GET /url/stats/{slug}` - Click count of a slug
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/url/stats/{slug}", get(stats_handler))
}
