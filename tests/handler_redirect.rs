mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use uuid::Uuid;

#[tokio::test]
async fn test_redirect_success() {
    let ctx = common::create_test_state();
    ctx.seed_url("abc", "https://example.com/target", Uuid::new_v4(), None);
    let server = TestServer::new(ctx.app()).unwrap();

    let response = server.get("/abc").await;

    response.assert_status(StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.header("location"), "https://example.com/target");
    assert_eq!(
        response.header("cache-control"),
        "no-store, no-cache, must-revalidate, proxy-revalidate"
    );
    assert_eq!(response.header("pragma"), "no-cache");
    assert_eq!(response.header("expires"), "0");

    assert_eq!(ctx.urls.get("abc").unwrap().clicks, 1);
}

#[tokio::test]
async fn test_redirect_counts_every_visit() {
    let ctx = common::create_test_state();
    ctx.seed_url("busy", "https://example.com", Uuid::new_v4(), None);
    let server = TestServer::new(ctx.app()).unwrap();

    for _ in 0..3 {
        server
            .get("/busy")
            .await
            .assert_status(StatusCode::MOVED_PERMANENTLY);
    }

    assert_eq!(ctx.urls.get("busy").unwrap().clicks, 3);
}

#[tokio::test]
async fn test_redirect_not_found() {
    let ctx = common::create_test_state();
    let server = TestServer::new(ctx.app()).unwrap();

    let response = server.get("/nonexistent").await;

    response.assert_status_not_found();
    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "not_found");
    assert_eq!(json["error"]["message"], "URL not found");
}

#[tokio::test]
async fn test_redirect_expired_url_returns_gone() {
    let ctx = common::create_test_state();
    ctx.seed_url(
        "old",
        "https://example.com",
        Uuid::new_v4(),
        Some(Utc::now() - Duration::hours(1)),
    );
    let server = TestServer::new(ctx.app()).unwrap();

    let response = server.get("/old").await;

    response.assert_status(StatusCode::GONE);
    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "expired");
    assert_eq!(json["error"]["message"], "URL has expired");

    let record = ctx.urls.get("old").unwrap();
    assert_eq!(record.clicks, 0);
}

#[tokio::test]
async fn test_redirect_to_unusable_stored_url_counts_no_click() {
    let ctx = common::create_test_state();
    ctx.seed_url("nl", "https://example.com/a\nb", Uuid::new_v4(), None);
    let server = TestServer::new(ctx.app()).unwrap();

    for _ in 0..2 {
        server
            .get("/nl")
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    assert_eq!(ctx.urls.get("nl").unwrap().clicks, 0);
}

#[tokio::test]
async fn test_redirect_before_expiry() {
    let ctx = common::create_test_state();
    ctx.seed_url(
        "fresh",
        "https://example.com",
        Uuid::new_v4(),
        Some(Utc::now() + Duration::days(1)),
    );
    let server = TestServer::new(ctx.app()).unwrap();

    server
        .get("/fresh")
        .await
        .assert_status(StatusCode::MOVED_PERMANENTLY);
}

#[tokio::test]
async fn test_shorten_then_resolve_then_stats() {
    let ctx = common::create_test_state();
    let auth = ctx.bearer_for(Uuid::new_v4()).await;
    let server = TestServer::new(ctx.app()).unwrap();

    server
        .post("/api/url/shorten")
        .add_header("Authorization", &auth)
        .json(&json!({
            "originalUrl": "https://example.com",
            "customSlug": "abc",
            "expiresInDays": 7
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server.get("/abc").await;
    response.assert_status(StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.header("location"), "https://example.com");

    let response = server.get("/api/url/stats/abc").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["clicks"], 1);
}
