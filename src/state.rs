//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, UrlService};
use crate::domain::repositories::{TokenRepository, UrlRepository};

/// Services shared across request handlers.
///
/// Cloning is cheap; every field is an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService<dyn UrlRepository>>,
    pub auth_service: Arc<AuthService<dyn TokenRepository>>,
}

impl AppState {
    pub fn new(
        url_service: Arc<UrlService<dyn UrlRepository>>,
        auth_service: Arc<AuthService<dyn TokenRepository>>,
    ) -> Self {
        Self {
            url_service,
            auth_service,
        }
    }
}
