//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access; concrete implementations live in
//! `crate::infrastructure::persistence`, and mocks are generated with `mockall`
//! for unit tests.
//!
//! - [`UrlRepository`] - URL record storage
//! - [`TokenRepository`] - API token authentication

pub mod token_repository;
pub mod url_repository;

pub use token_repository::{ApiToken, TokenRepository};
pub use url_repository::UrlRepository;

#[cfg(test)]
pub use token_repository::MockTokenRepository;
#[cfg(test)]
pub use url_repository::MockUrlRepository;
