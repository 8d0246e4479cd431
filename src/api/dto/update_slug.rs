//! DTOs for slug renaming.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::url::UrlResponse;

/// Request body for `PUT /api/url/update-slug/{id}`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSlugRequest {
    #[validate(length(min = 1, message = "newSlug is required"))]
    pub new_slug: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSlugResponse {
    pub message: &'static str,
    pub updated_url: UrlResponse,
}
