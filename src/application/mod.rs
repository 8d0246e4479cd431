//! Application layer services implementing business logic.
//!
//! Services consume repository traits and give HTTP handlers a small API that
//! speaks in domain terms.
//!
//! # Available Services
//!
//! - [`services::url_service::UrlService`] - Slug allocation, resolution, renaming and removal
//! - [`services::auth_service::AuthService`] - API token authentication

pub mod services;
