//! Domain layer: entities and repository interfaces.
//!
//! The domain layer has no dependencies on infrastructure or presentation. Slug
//! lifecycle rules live in [`crate::application::services::UrlService`], which
//! consumes the traits defined in [`repositories`].
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions

pub mod entities;
pub mod repositories;
