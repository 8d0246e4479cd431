//! Repository trait for URL record persistence.

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface over the single collection of URL records.
///
/// The store is the authoritative guard for slug uniqueness: any write that
/// would duplicate a slug must fail with kind `SlugTaken`, even when the
/// caller's pre-check passed.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new record with `clicks = 0`.
    ///
    /// # Errors
    ///
    /// Returns `SlugTaken` if another record already holds the slug.
    /// Returns `PersistenceFailure` on other database errors.
    async fn create(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError>;

    /// Finds a record by its slug.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Finds a record by its id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UrlRecord>, AppError>;

    /// Replaces the slug of record `id`.
    ///
    /// Returns `Ok(None)` if the record no longer exists.
    ///
    /// # Errors
    ///
    /// Returns `SlugTaken` if another record already holds `new_slug`.
    async fn update_slug(&self, id: Uuid, new_slug: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Adds one to the click counter of record `id` in a single write.
    ///
    /// Returns the new counter value, or `Ok(None)` if the record no longer exists.
    async fn increment_clicks(&self, id: Uuid) -> Result<Option<i64>, AppError>;

    /// Permanently removes record `id`.
    ///
    /// Returns `Ok(true)` if a record was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;

    /// Lists all records of `owner_id`, newest first.
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<UrlRecord>, AppError>;

    /// Verifies the store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
