//! DTOs for the shorten endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use uuid::Uuid;
use validator::Validate;

use crate::application::services::ShortenInput;
use crate::error::AppError;

/// Request to shorten a single URL.
///
/// ```json
/// {
///   "originalUrl": "https://example.com/some/long/path",
///   "customSlug": "my-link",
///   "expiresInDays": 7
/// }
/// ```
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    #[validate(length(min = 1, message = "originalUrl is required"))]
    pub original_url: String,

    /// Optional custom slug. Blank values are treated as absent.
    pub custom_slug: Option<String>,

    /// Accepts a JSON number or a numeric string; checked in [`Self::into_input`].
    #[serde(default)]
    pub expires_in_days: Option<Value>,
}

impl ShortenRequest {
    /// Converts the request into service input for `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidExpiration` if `expiresInDays` is neither a number nor
    /// a numeric string.
    pub fn into_input(self, owner_id: Uuid) -> Result<ShortenInput, AppError> {
        let expires_in_days = parse_days(self.expires_in_days)?;

        Ok(ShortenInput {
            original_url: self.original_url,
            owner_id,
            custom_slug: self.custom_slug,
            expires_in_days,
        })
    }
}

fn parse_days(raw: Option<Value>) -> Result<Option<f64>, AppError> {
    let days = match &raw {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    days.map(Some)
        .ok_or_else(|| AppError::invalid_expiration(json!({ "expiresInDays": raw })))
}

/// Response for a newly created short URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub id: Uuid,
    pub slug: String,
    pub short_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}
