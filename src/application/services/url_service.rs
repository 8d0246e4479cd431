//! Slug lifecycle service: shorten, resolve, stats, rename, delete and list.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::domain::entities::{NewUrlRecord, UrlRecord, compose_short_url};
use crate::domain::repositories::UrlRepository;
use crate::error::{AppError, ErrorKind};
use crate::utils::slug::{generate_slug, is_reserved_slug, is_valid_slug};
use crate::utils::url_validator::validate_http_url;

/// Default number of attempts when searching for a free generated slug.
pub const DEFAULT_MAX_GENERATION_ATTEMPTS: usize = 10;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Input for [`UrlService::shorten`].
#[derive(Debug, Clone)]
pub struct ShortenInput {
    pub original_url: String,
    pub owner_id: Uuid,
    pub custom_slug: Option<String>,
    pub expires_in_days: Option<f64>,
}

/// Click statistics for a single slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlStats {
    pub clicks: i64,
}

/// Service owning every rule of the slug lifecycle.
///
/// The repository's uniqueness constraint is the final word on slug ownership;
/// the lookups performed here only short-circuit the common conflict case.
pub struct UrlService<R: UrlRepository + ?Sized> {
    repository: Arc<R>,
    base_url: String,
    max_generation_attempts: usize,
}

impl<R: UrlRepository + ?Sized> UrlService<R> {
    /// Creates a new URL service.
    ///
    /// # Arguments
    ///
    /// - `repository` - record store
    /// - `base_url` - prefix used to compose short URLs (e.g. `https://s.example.com`)
    pub fn new(repository: Arc<R>, base_url: impl Into<String>) -> Self {
        Self {
            repository,
            base_url: base_url.into(),
            max_generation_attempts: DEFAULT_MAX_GENERATION_ATTEMPTS,
        }
    }

    /// Overrides how many generated slugs are tried before giving up.
    pub fn with_max_generation_attempts(mut self, attempts: usize) -> Self {
        self.max_generation_attempts = attempts.max(1);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Composes the public short URL for `slug`.
    pub fn short_url(&self, slug: &str) -> String {
        compose_short_url(&self.base_url, slug)
    }

    /// Creates a new short URL.
    ///
    /// A custom slug is trimmed first; if nothing remains a slug is generated,
    /// exactly as if none had been supplied.
    ///
    /// # Errors
    ///
    /// - `InvalidUrl` if `original_url` is not an absolute http/https URL
    /// - `InvalidExpiration` if `expires_in_days` is not a positive finite number
    /// - `InvalidSlugFormat` if the custom slug breaks the slug grammar
    /// - `ReservedSlug` if the custom slug names a fixed route such as `health`
    /// - `SlugTaken` if the custom slug is already in use (including a lost race
    ///   detected by the store)
    /// - `GenerationExhausted` if no free slug was found
    pub async fn shorten(&self, input: ShortenInput) -> Result<UrlRecord, AppError> {
        validate_http_url(&input.original_url).map_err(|e| {
            AppError::invalid_url("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        let expires_at = input
            .expires_in_days
            .map(|days| expiration_from_days(Utc::now(), days))
            .transpose()?;

        let custom_slug = input
            .custom_slug
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let slug = match custom_slug {
            Some(custom) => {
                self.ensure_slug_available(custom).await?;
                custom.to_string()
            }
            None => self.generate_unique_slug().await?,
        };

        let record = self
            .repository
            .create(NewUrlRecord {
                original_url: input.original_url,
                slug,
                owner_id: input.owner_id,
                expires_at,
            })
            .await?;

        metrics::counter!("urls_created_total").increment(1);
        tracing::info!(
            id = %record.id,
            slug = %record.slug,
            owner_id = %record.owner_id,
            expires_at = ?record.expires_at,
            "Short URL created"
        );

        Ok(record)
    }

    /// Resolves a slug to its original URL and counts the click.
    ///
    /// Expired records are left in place and their counter is not touched.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no record holds `slug`
    /// - `Expired` if the record's expiry has passed
    /// - `Internal` if the stored URL is not a valid redirect target; no click
    ///   is counted
    pub async fn resolve(&self, slug: &str) -> Result<String, AppError> {
        let record = self.find_by_slug_or_not_found(slug).await?;

        if record.is_expired() {
            metrics::counter!("redirects_expired_total").increment(1);
            tracing::debug!(slug, "Rejected resolution of expired URL");
            return Err(AppError::expired(json!({ "slug": slug })));
        }

        // A click is only counted for a redirect that can actually be served.
        if validate_http_url(&record.original_url).is_err() {
            return Err(AppError::internal(
                "Stored URL cannot be redirected to",
                json!({ "slug": slug }),
            ));
        }

        let clicks = self
            .repository
            .increment_clicks(record.id)
            .await?
            .ok_or_else(|| url_not_found(json!({ "slug": slug })))?;

        metrics::counter!("redirects_total").increment(1);
        tracing::debug!(slug, clicks, "Resolved short URL");

        Ok(record.original_url)
    }

    /// Returns the click count for `slug` without side effects.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record holds `slug`.
    pub async fn stats(&self, slug: &str) -> Result<UrlStats, AppError> {
        let record = self.find_by_slug_or_not_found(slug).await?;
        Ok(UrlStats {
            clicks: record.clicks,
        })
    }

    /// Renames the slug of a record owned by `requester_id`.
    ///
    /// # Errors
    ///
    /// Checked in this order: `InvalidSlugFormat`, `ReservedSlug`, `SlugTaken`, `InvalidId`,
    /// `NotFound`, `Forbidden`. A conflicting write detected by the store is
    /// reported as `SlugTaken`.
    pub async fn update_slug(
        &self,
        url_id: &str,
        requester_id: Uuid,
        new_slug: &str,
    ) -> Result<UrlRecord, AppError> {
        let new_slug = new_slug.trim();
        self.ensure_slug_available(new_slug).await?;

        let record = self.load_owned(url_id, requester_id, "update this slug").await?;

        let updated = self
            .repository
            .update_slug(record.id, new_slug)
            .await?
            .ok_or_else(|| url_not_found(json!({ "id": record.id })))?;

        tracing::info!(
            id = %updated.id,
            old_slug = %record.slug,
            new_slug = %updated.slug,
            "Slug updated"
        );

        Ok(updated)
    }

    /// Permanently deletes a record owned by `requester_id`.
    ///
    /// # Errors
    ///
    /// `InvalidId`, `NotFound` or `Forbidden`, in that order.
    pub async fn delete(&self, url_id: &str, requester_id: Uuid) -> Result<(), AppError> {
        let record = self.load_owned(url_id, requester_id, "delete this URL").await?;

        if !self.repository.delete(record.id).await? {
            return Err(url_not_found(json!({ "id": record.id })));
        }

        tracing::info!(id = %record.id, slug = %record.slug, "Short URL deleted");

        Ok(())
    }

    /// Lists every record created by `owner_id`, newest first.
    pub async fn list_owned(&self, owner_id: Uuid) -> Result<Vec<UrlRecord>, AppError> {
        self.repository.list_by_owner(owner_id).await
    }

    /// Checks that the backing store is reachable.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    async fn find_by_slug_or_not_found(&self, slug: &str) -> Result<UrlRecord, AppError> {
        self.repository
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| url_not_found(json!({ "slug": slug })))
    }

    /// Rejects slugs that break the grammar, shadow a route or are already held.
    async fn ensure_slug_available(&self, slug: &str) -> Result<(), AppError> {
        if !is_valid_slug(slug) {
            return Err(AppError::invalid_slug_format(json!({ "slug": slug })));
        }

        if is_reserved_slug(slug) {
            return Err(AppError::reserved_slug(json!({ "slug": slug })));
        }

        if self.repository.find_by_slug(slug).await?.is_some() {
            return Err(AppError::slug_taken(json!({ "slug": slug })));
        }

        Ok(())
    }

    /// Parses `url_id`, loads the record and checks that `requester_id` owns it.
    async fn load_owned(
        &self,
        url_id: &str,
        requester_id: Uuid,
        action: &str,
    ) -> Result<UrlRecord, AppError> {
        let id = parse_url_id(url_id)?;

        let record = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| url_not_found(json!({ "id": id })))?;

        if !record.is_owned_by(requester_id) {
            tracing::warn!(id = %id, requester_id = %requester_id, "Ownership check failed");
            return Err(AppError::forbidden(
                format!("You do not have permission to {action}."),
                json!({ "id": id }),
            ));
        }

        Ok(record)
    }

    /// Draws random slugs until one is free or the attempt budget runs out.
    async fn generate_unique_slug(&self) -> Result<String, AppError> {
        for attempt in 1..=self.max_generation_attempts {
            let slug = generate_slug()?;

            if self.repository.find_by_slug(&slug).await?.is_none() {
                return Ok(slug);
            }

            tracing::debug!(attempt, slug = %slug, "Generated slug collided");
        }

        tracing::error!(
            attempts = self.max_generation_attempts,
            "Slug generation exhausted"
        );

        Err(AppError::new(
            ErrorKind::GenerationExhausted,
            "Failed to generate a unique slug",
            json!({ "attempts": self.max_generation_attempts }),
        ))
    }
}

/// Parses a record id supplied by a client.
///
/// # Errors
///
/// Returns `InvalidId` if `url_id` is not a UUID.
pub fn parse_url_id(url_id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(url_id.trim()).map_err(|_| AppError::invalid_id(json!({ "id": url_id })))
}

/// Computes an expiry `days` after `now`.
///
/// Fractional days are honoured to the millisecond.
///
/// # Errors
///
/// Returns `InvalidExpiration` if `days` is not a positive finite number or the
/// resulting timestamp is out of range.
pub fn expiration_from_days(now: DateTime<Utc>, days: f64) -> Result<DateTime<Utc>, AppError> {
    if !days.is_finite() || days <= 0.0 {
        return Err(AppError::invalid_expiration(
            json!({ "expires_in_days": days }),
        ));
    }

    let millis = (days * MILLIS_PER_DAY).round() as i64;

    Duration::try_milliseconds(millis)
        .and_then(|delta| now.checked_add_signed(delta))
        .ok_or_else(|| AppError::invalid_expiration(json!({ "expires_in_days": days })))
}

fn url_not_found(details: serde_json::Value) -> AppError {
    AppError::not_found("URL not found", details)
}
