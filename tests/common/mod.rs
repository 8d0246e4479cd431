#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::extract::ConnectInfo;
use chrono::{DateTime, Utc};
use serde_json::json;
use slug_shortener::application::services::auth_service::hash_token;
use slug_shortener::application::services::{AuthService, UrlService};
use slug_shortener::domain::entities::{NewUrlRecord, UrlRecord};
use slug_shortener::domain::repositories::{ApiToken, TokenRepository, UrlRepository};
use slug_shortener::error::AppError;
use slug_shortener::routes::{ShortenRateLimit, router};
use slug_shortener::state::AppState;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use tower::Layer;
use uuid::Uuid;

pub const BASE_URL: &str = "https://s.example.com";
pub const SIGNING_SECRET: &str = "test-signing-secret";

/// URL store backed by a vector; enforces slug uniqueness like the real table.
#[derive(Default)]
pub struct InMemoryUrlRepository {
    records: Mutex<Vec<UrlRecord>>,
    unavailable: AtomicBool,
}

impl InMemoryUrlRepository {
    /// Makes every subsequent call fail as if the database were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn insert(&self, record: UrlRecord) {
        self.records.lock().unwrap().push(record);
    }

    pub fn get(&self, slug: &str) -> Option<UrlRecord> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.slug == slug)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    fn check_available(&self) -> Result<(), AppError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::persistence(
                "Database error",
                json!({ "reason": "connection refused" }),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn create(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        self.check_available()?;
        let mut records = self.records.lock().unwrap();

        if records.iter().any(|r| r.slug == new_record.slug) {
            return Err(AppError::slug_taken(json!({ "slug": new_record.slug })));
        }

        let record = UrlRecord {
            id: Uuid::new_v4(),
            original_url: new_record.original_url,
            slug: new_record.slug,
            owner_id: new_record.owner_id,
            created_at: Utc::now(),
            expires_at: new_record.expires_at,
            clicks: 0,
        };
        records.push(record.clone());

        Ok(record)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<UrlRecord>, AppError> {
        self.check_available()?;
        Ok(self.get(slug))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UrlRecord>, AppError> {
        self.check_available()?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn update_slug(&self, id: Uuid, new_slug: &str) -> Result<Option<UrlRecord>, AppError> {
        self.check_available()?;
        let mut records = self.records.lock().unwrap();

        if records.iter().any(|r| r.slug == new_slug && r.id != id) {
            return Err(AppError::slug_taken(json!({ "slug": new_slug })));
        }

        Ok(records.iter_mut().find(|r| r.id == id).map(|r| {
            r.slug = new_slug.to_string();
            r.clone()
        }))
    }

    async fn increment_clicks(&self, id: Uuid) -> Result<Option<i64>, AppError> {
        self.check_available()?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter_mut()
            .find(|r| r.id == id)
            .map(|r| {
                r.clicks += 1;
                r.clicks
            }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        self.check_available()?;
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() < before)
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<UrlRecord>, AppError> {
        self.check_available()?;
        let mut owned: Vec<UrlRecord> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check_available()
    }
}

#[derive(Default)]
pub struct InMemoryTokenRepository {
    tokens: Mutex<Vec<ApiToken>>,
    next_id: AtomicI64,
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn find_owner(&self, token_hash: &str) -> Result<Option<Uuid>, AppError> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.token_hash == token_hash && t.revoked_at.is_none())
            .map(|t| t.owner_id))
    }

    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError> {
        if let Some(token) = self
            .tokens
            .lock()
            .unwrap()
            .iter_mut()
            .find(|t| t.token_hash == token_hash)
        {
            token.last_used_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn create_token(
        &self,
        name: &str,
        owner_id: Uuid,
        token_hash: &str,
    ) -> Result<ApiToken, AppError> {
        let token = ApiToken {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            name: name.to_string(),
            owner_id,
            token_hash: token_hash.to_string(),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        };
        self.tokens.lock().unwrap().push(token.clone());
        Ok(token)
    }

    async fn list_tokens(&self) -> Result<Vec<ApiToken>, AppError> {
        Ok(self.tokens.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ApiToken>, AppError> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<ApiToken>, AppError> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.name == name)
            .cloned())
    }

    async fn revoke_token(&self, id: i64) -> Result<(), AppError> {
        match self
            .tokens
            .lock()
            .unwrap()
            .iter_mut()
            .find(|t| t.id == id && t.revoked_at.is_none())
        {
            Some(token) => {
                token.revoked_at = Some(Utc::now());
                Ok(())
            }
            None => Err(AppError::not_found("Token not found", json!({ "id": id }))),
        }
    }
}

/// Application state wired to in-memory stores, plus handles to inspect them.
pub struct TestContext {
    pub state: AppState,
    pub urls: Arc<InMemoryUrlRepository>,
    pub tokens: Arc<InMemoryTokenRepository>,
}

pub fn create_test_state() -> TestContext {
    let urls = Arc::new(InMemoryUrlRepository::default());
    let tokens = Arc::new(InMemoryTokenRepository::default());

    let url_repository: Arc<dyn UrlRepository> = urls.clone();
    let token_repository: Arc<dyn TokenRepository> = tokens.clone();

    let url_service = Arc::new(UrlService::new(url_repository, BASE_URL));
    let auth_service = Arc::new(AuthService::new(
        token_repository,
        SIGNING_SECRET.to_string(),
    ));

    TestContext {
        state: AppState::new(url_service, auth_service),
        urls,
        tokens,
    }
}

impl TestContext {
    /// Full application routes without rate limiting.
    pub fn app(&self) -> Router {
        router(self.state.clone(), ShortenRateLimit::Disabled)
    }

    /// Issues a token for `owner_id` and returns the raw `Authorization` value.
    pub async fn bearer_for(&self, owner_id: Uuid) -> String {
        let raw = format!("token-{}", Uuid::new_v4().simple());
        self.tokens
            .create_token(
                &format!("test-{}", owner_id),
                owner_id,
                &hash_token(SIGNING_SECRET, &raw),
            )
            .await
            .unwrap();
        format!("Bearer {}", raw)
    }

    /// Stores a record directly, bypassing validation.
    pub fn seed_url(
        &self,
        slug: &str,
        original_url: &str,
        owner_id: Uuid,
        expires_at: Option<DateTime<Utc>>,
    ) -> UrlRecord {
        let record = UrlRecord {
            id: Uuid::new_v4(),
            original_url: original_url.to_string(),
            slug: slug.to_string(),
            owner_id,
            created_at: Utc::now(),
            expires_at,
            clicks: 0,
        };
        self.urls.insert(record.clone());
        record
    }
}

/// Inserts a fixed `ConnectInfo` so peer-keyed rate limiting works in tests.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
