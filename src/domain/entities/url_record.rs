//! URL record entity: one shortened URL owned by one identity.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A stored short URL.
///
/// The public short URL is not stored; it is derived from `slug` with
/// [`UrlRecord::short_url`] so it can never drift from the current slug.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlRecord {
    pub id: Uuid,
    pub original_url: String,
    pub slug: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub clicks: i64,
}

impl UrlRecord {
    /// Returns true if the record has an expiry at or before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| now >= e)
    }

    /// Returns true if the record has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Returns true if `requester` created this record.
    pub fn is_owned_by(&self, requester: Uuid) -> bool {
        self.owner_id == requester
    }

    /// Composes the public short URL from a base URL and the current slug.
    pub fn short_url(&self, base_url: &str) -> String {
        compose_short_url(base_url, &self.slug)
    }
}

/// Joins a base URL and a slug with exactly one `/` between them.
pub fn compose_short_url(base_url: &str, slug: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), slug)
}

/// Input data for inserting a new URL record.
///
/// `id`, `created_at` and `clicks` are assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUrlRecord {
    pub original_url: String,
    pub slug: String,
    pub owner_id: Uuid,
    pub expires_at: Option<DateTime<Utc>>,
}
