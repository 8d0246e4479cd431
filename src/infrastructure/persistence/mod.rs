//! PostgreSQL repository implementations.
//!
//! Queries are built with SQLx runtime binding and mapped through
//! `sqlx::FromRow` row structs.
//!
//! - [`PgUrlRepository`] - URL record storage
//! - [`PgTokenRepository`] - API token storage and validation

pub mod pg_token_repository;
pub mod pg_url_repository;

pub use pg_token_repository::PgTokenRepository;
pub use pg_url_repository::PgUrlRepository;
