//! Integration tests for the `sessions` repository and `PgSessionStore`.
//!
//! Exercises the store contract against a real database:
//! - Insert and joined lookup (no password hash in the owner projection)
//! - Id collision surfaces as a conflict
//! - Expiry updates and deletes are idempotent
//! - Cascade delete when the owning user is removed

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use sketchboard_core::session::{session_id_from_token, SessionError, SessionStore};
use sketchboard_db::models::user::{CreateUser, User};
use sketchboard_db::repositories::{SessionRepo, UserRepo};
use sketchboard_db::PgSessionStore;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, username: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@test.com"),
            password_hash: Some("$argon2id$not-a-real-hash".to_string()),
            verified: false,
            picture: None,
        },
    )
    .await
    .expect("user creation should succeed")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_find_with_owner(pool: PgPool) {
    let user = new_user(&pool, "owner").await;
    let store = PgSessionStore::new(pool);
    let id = session_id_from_token("abc123");
    let expires_at = Utc::now() + Duration::days(30);

    let session = store.create(&id, user.id, expires_at).await.unwrap();
    assert_eq!(session.id, id);
    assert_eq!(session.user_id, user.id);

    let found = store
        .find_with_owner(&id)
        .await
        .unwrap()
        .expect("session should be found");
    assert_eq!(found.session.user_id, user.id);
    assert_eq!(found.user.id, user.id);
    assert_eq!(found.user.username, "owner");
    assert_eq!(found.user.email, "owner@test.com");
    // Postgres stores microseconds; compare at that precision.
    assert_eq!(
        found.session.expires_at.timestamp_micros(),
        expires_at.timestamp_micros()
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_unknown_session_returns_none(pool: PgPool) {
    let store = PgSessionStore::new(pool);
    let found = store
        .find_with_owner(&session_id_from_token("wrong"))
        .await
        .unwrap();
    assert!(found.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_id_is_conflict(pool: PgPool) {
    let user = new_user(&pool, "dup").await;
    let store = PgSessionStore::new(pool.clone());
    let id = session_id_from_token("same-token");
    let expires_at = Utc::now() + Duration::days(30);

    store.create(&id, user.id, expires_at).await.unwrap();
    let err = store
        .create(&id, user.id, expires_at + Duration::days(1))
        .await
        .unwrap_err();
    assert_matches!(err, SessionError::Conflict(_));

    // The first row is untouched.
    let row = SessionRepo::find_by_id(&pool, &id).await.unwrap().unwrap();
    assert_eq!(row.expires_at.timestamp_micros(), expires_at.timestamp_micros());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_user_is_store_error(pool: PgPool) {
    let store = PgSessionStore::new(pool);
    let err = store
        .create(&session_id_from_token("orphan"), 999_999, Utc::now())
        .await
        .unwrap_err();
    assert_matches!(err, SessionError::Store(_));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_expiry(pool: PgPool) {
    let user = new_user(&pool, "refresh").await;
    let store = PgSessionStore::new(pool.clone());
    let id = session_id_from_token("refresh-token");
    store
        .create(&id, user.id, Utc::now() + Duration::days(10))
        .await
        .unwrap();

    let new_expiry = Utc::now() + Duration::days(30);
    assert_eq!(store.update_expiry(&id, new_expiry).await.unwrap(), 1);

    let row = SessionRepo::find_by_id(&pool, &id).await.unwrap().unwrap();
    assert_eq!(row.expires_at.timestamp_micros(), new_expiry.timestamp_micros());

    // A session deleted underneath us is not an error.
    store.delete(&id).await.unwrap();
    assert_eq!(store.update_expiry(&id, new_expiry).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_is_idempotent(pool: PgPool) {
    let user = new_user(&pool, "twice").await;
    let store = PgSessionStore::new(pool);
    let id = session_id_from_token("twice-token");
    store
        .create(&id, user.id, Utc::now() + Duration::days(30))
        .await
        .unwrap();

    assert_eq!(store.delete(&id).await.unwrap(), 1);
    assert_eq!(store.delete(&id).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_all_for_user(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    let bob = new_user(&pool, "bob").await;
    let store = PgSessionStore::new(pool);
    let expires_at = Utc::now() + Duration::days(30);

    for token in ["a1", "a2", "a3"] {
        store
            .create(&session_id_from_token(token), alice.id, expires_at)
            .await
            .unwrap();
    }
    store
        .create(&session_id_from_token("b1"), bob.id, expires_at)
        .await
        .unwrap();

    assert_eq!(store.delete_all_for_user(alice.id).await.unwrap(), 3);
    assert!(store
        .find_with_owner(&session_id_from_token("b1"))
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sessions_cascade_with_user(pool: PgPool) {
    let user = new_user(&pool, "leaving").await;
    let store = PgSessionStore::new(pool.clone());
    let id = session_id_from_token("leaving-token");
    store
        .create(&id, user.id, Utc::now() + Duration::days(30))
        .await
        .unwrap();

    assert!(UserRepo::delete(&pool, user.id).await.unwrap());
    assert!(SessionRepo::find_by_id(&pool, &id).await.unwrap().is_none());
}
