//! JSON representation of a stored URL record.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::UrlRecord;

/// A URL record as returned by the list and update endpoints.
///
/// `shortUrl` is derived from the current slug at response time.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlResponse {
    pub id: Uuid,
    pub original_url: String,
    pub slug: String,
    pub short_url: String,
    pub owner_id: Uuid,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl UrlResponse {
    pub fn from_record(record: UrlRecord, base_url: &str) -> Self {
        let short_url = record.short_url(base_url);

        Self {
            id: record.id,
            original_url: record.original_url,
            slug: record.slug,
            short_url,
            owner_id: record.owner_id,
            clicks: record.clicks,
            created_at: record.created_at,
            expires_at: record.expires_at,
        }
    }
}

/// Generic acknowledgement body, e.g. after deletion.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
