use slug_shortener::domain::repositories::TokenRepository;
use slug_shortener::infrastructure::persistence::PgTokenRepository;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

#[sqlx::test]
async fn test_create_token(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));
    let owner = Uuid::new_v4();

    let token = repo.create_token("test-token", owner, "hash123").await.unwrap();

    assert_eq!(token.name, "test-token");
    assert_eq!(token.owner_id, owner);
    assert_eq!(token.token_hash, "hash123");
    assert!(token.revoked_at.is_none());
    assert!(token.last_used_at.is_none());
}

#[sqlx::test]
async fn test_find_owner(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));
    let owner = Uuid::new_v4();

    repo.create_token("valid-token", owner, "validhash").await.unwrap();

    assert_eq!(repo.find_owner("validhash").await.unwrap(), Some(owner));
    assert_eq!(repo.find_owner("nonexistent").await.unwrap(), None);
}

#[sqlx::test]
async fn test_revoked_token_has_no_owner(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));

    let token = repo
        .create_token("revoked-token", Uuid::new_v4(), "revokedhash")
        .await
        .unwrap();
    repo.revoke_token(token.id).await.unwrap();

    assert_eq!(repo.find_owner("revokedhash").await.unwrap(), None);

    let stored = repo.find_by_id(token.id).await.unwrap().unwrap();
    assert!(stored.revoked_at.is_some());
}

#[sqlx::test]
async fn test_revoke_unknown_token(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));

    assert!(repo.revoke_token(999_999).await.is_err());
}

#[sqlx::test]
async fn test_update_last_used(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));

    let token = repo
        .create_token("used-token", Uuid::new_v4(), "usedhash")
        .await
        .unwrap();
    repo.update_last_used("usedhash").await.unwrap();

    let stored = repo.find_by_name("used-token").await.unwrap().unwrap();
    assert_eq!(stored.id, token.id);
    assert!(stored.last_used_at.is_some());
}

#[sqlx::test]
async fn test_list_tokens(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));

    repo.create_token("first", Uuid::new_v4(), "h1").await.unwrap();
    repo.create_token("second", Uuid::new_v4(), "h2").await.unwrap();

    let tokens = repo.list_tokens().await.unwrap();
    assert_eq!(tokens.len(), 2);
}
