//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{slug}`  - Short URL redirect (public)
//! - `GET  /health`  - Health check (public)
//! - `/api/url/*`    - REST API (Bearer token required, except stats)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on the shorten endpoint
//! - **Authentication** - Bearer token resolving the caller's owner id
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// How the shorten endpoint is rate limited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortenRateLimit {
    /// No limit. Used by tests, which run without a peer address.
    Disabled,
    /// Requests per minute, keyed by the socket peer address.
    PerPeer(u32),
    /// Requests per minute, keyed by `X-Forwarded-For` / `X-Real-IP`.
    /// Enable only behind a trusted reverse proxy.
    PerForwardedIp(u32),
}

impl ShortenRateLimit {
    pub fn new(per_minute: u32, behind_proxy: bool) -> Self {
        if behind_proxy {
            Self::PerForwardedIp(per_minute)
        } else {
            Self::PerPeer(per_minute)
        }
    }
}

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `shorten_limit` - limiter for `POST /api/url/shorten`; keyed limiters need the
///   server to provide `ConnectInfo<SocketAddr>`
pub fn app_router(state: AppState, shorten_limit: ShortenRateLimit) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, shorten_limit))
}

/// Builds the routes and middleware without path normalization.
pub fn router(state: AppState, shorten_limit: ShortenRateLimit) -> Router {
    let auth_layer = middleware::from_fn_with_state(state.clone(), auth::layer);

    let shorten_router = api::routes::shorten_routes().route_layer(auth_layer.clone());
    let shorten_router = match shorten_limit {
        ShortenRateLimit::Disabled => shorten_router,
        ShortenRateLimit::PerPeer(n) => shorten_router.layer(rate_limit::shorten_layer(n)),
        ShortenRateLimit::PerForwardedIp(n) => {
            shorten_router.layer(rate_limit::proxied_shorten_layer(n))
        }
    };

    let api_router = Router::new()
        .merge(shorten_router)
        .merge(api::routes::protected_routes().route_layer(auth_layer))
        .merge(api::routes::public_routes());

    Router::new()
        .route("/{slug}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer())
}
