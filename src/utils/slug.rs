//! Slug generation and validation utilities.
//!
//! Generated slugs are 8 lowercase hex characters drawn from the operating
//! system CSPRNG, so they cannot be predicted by external callers.

use crate::error::AppError;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Number of random bytes drawn per generated slug (hex-encoded to 8 chars).
const SLUG_LENGTH_BYTES: usize = 4;

/// Allowed slug grammar.
static SLUG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("slug regex is valid"));

/// Returns `true` if `slug` is non-empty and contains only ASCII letters,
/// digits, hyphens and underscores.
///
/// # Examples
///
/// ```
/// use slug_shortener::utils::slug::is_valid_slug;
///
/// assert!(is_valid_slug("my-link_2024"));
/// assert!(!is_valid_slug("bad slug!"));
/// assert!(!is_valid_slug(""));
/// ```
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_REGEX.is_match(slug)
}

/// Path segments served by fixed routes, which would shadow `/{slug}`.
pub const RESERVED_SLUGS: &[&str] = &["api", "health"];

/// Returns `true` if `slug` names a fixed route and cannot be resolved.
pub fn is_reserved_slug(slug: &str) -> bool {
    RESERVED_SLUGS.contains(&slug)
}

/// Generates a random slug of 8 lowercase hex characters.
///
/// # Errors
///
/// Returns [`AppError`] with kind `Internal` if the system random
/// number generator is unavailable.
pub fn generate_slug() -> Result<String, AppError> {
    let mut buffer = [0u8; SLUG_LENGTH_BYTES];

    getrandom::fill(&mut buffer).map_err(|e| {
        AppError::internal(
            "Failed to generate random slug",
            json!({ "reason": e.to_string() }),
        )
    })?;

    Ok(hex::encode(buffer))
}
