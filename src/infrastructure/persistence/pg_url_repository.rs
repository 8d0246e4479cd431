//! PostgreSQL implementation of the URL record repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation_on_slug;

/// PostgreSQL repository for URL records.
///
/// Slug uniqueness is enforced by the `urls_slug_key` constraint; violations
/// surface as `SlugTaken`. Click increments are single `UPDATE` statements.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UrlRow {
    id: Uuid,
    original_url: String,
    slug: String,
    owner_id: Uuid,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
    clicks: i64,
}

impl From<UrlRow> for UrlRecord {
    fn from(row: UrlRow) -> Self {
        UrlRecord {
            id: row.id,
            original_url: row.original_url,
            slug: row.slug,
            owner_id: row.owner_id,
            created_at: row.created_at,
            expires_at: row.expires_at,
            clicks: row.clicks,
        }
    }
}

/// Maps write errors, turning slug constraint violations into `SlugTaken`.
fn map_write_error(e: sqlx::Error, slug: &str) -> AppError {
    if is_unique_violation_on_slug(&e) {
        return AppError::slug_taken(json!({ "slug": slug }));
    }
    e.into()
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn create(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            INSERT INTO urls (original_url, slug, owner_id, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, original_url, slug, owner_id, created_at, expires_at, clicks
            "#,
        )
        .bind(&new_record.original_url)
        .bind(&new_record.slug)
        .bind(new_record.owner_id)
        .bind(new_record.expires_at)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| map_write_error(e, &new_record.slug))?;

        Ok(row.into())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, original_url, slug, owner_id, created_at, expires_at, clicks
            FROM urls
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, original_url, slug, owner_id, created_at, expires_at, clicks
            FROM urls
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn update_slug(&self, id: Uuid, new_slug: &str) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            UPDATE urls
            SET slug = $2
            WHERE id = $1
            RETURNING id, original_url, slug, owner_id, created_at, expires_at, clicks
            "#,
        )
        .bind(id)
        .bind(new_slug)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| map_write_error(e, new_slug))?;

        Ok(row.map(Into::into))
    }

    async fn increment_clicks(&self, id: Uuid) -> Result<Option<i64>, AppError> {
        let clicks = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE urls
            SET clicks = clicks + 1
            WHERE id = $1
            RETURNING clicks
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(clicks)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM urls WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<UrlRecord>, AppError> {
        let rows = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, original_url, slug, owner_id, created_at, expires_at, clicks
            FROM urls
            WHERE owner_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
