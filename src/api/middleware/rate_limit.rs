//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use std::time::Duration;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Rate limiter keyed by the socket peer address.
pub type PeerIpLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Rate limiter keyed by `X-Forwarded-For` / `X-Real-IP`, falling back to the peer address.
pub type ProxiedIpLayer =
    GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates the shorten limiter keyed by peer IP.
///
/// # Limits
///
/// - **Rate**: one token every `60 / per_minute` seconds
/// - **Burst**: `per_minute` requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Example
///
/// ```rust,ignore
/// let shorten = Router::new()
///     .route("/shorten", post(shorten_handler))
///     .layer(rate_limit::shorten_layer(5));
/// ```
pub fn shorten_layer(per_minute: u32) -> PeerIpLayer {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .period(replenish_period(per_minute))
            .burst_size(per_minute.max(1))
            .finish()
            .expect("non-zero period and burst size"),
    );

    GovernorLayer::new(governor_conf)
}

/// Same limits as [`shorten_layer`], keyed by the forwarded client IP.
///
/// Use only behind a trusted reverse proxy; clients can otherwise spoof the headers.
pub fn proxied_shorten_layer(per_minute: u32) -> ProxiedIpLayer {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(SmartIpKeyExtractor)
            .period(replenish_period(per_minute))
            .burst_size(per_minute.max(1))
            .finish()
            .expect("non-zero period and burst size"),
    );

    GovernorLayer::new(governor_conf)
}

/// Interval after which one more request is allowed.
fn replenish_period(per_minute: u32) -> Duration {
    Duration::from_millis(60_000 / u64::from(per_minute.max(1)))
}
