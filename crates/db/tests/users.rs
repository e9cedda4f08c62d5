//! Integration tests for the `users` repository.

use sketchboard_db::models::user::{CreateUser, UserResponse};
use sketchboard_db::repositories::UserRepo;
use sqlx::PgPool;

fn new_user(username: &str, email: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        email: email.to_string(),
        password_hash: None,
        verified: true,
        picture: Some("https://example.com/a.png".to_string()),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_lookup(pool: PgPool) {
    let created = UserRepo::create(&pool, &new_user("ada", "ada@test.com"))
        .await
        .unwrap();
    assert!(created.password_hash.is_none());

    let by_email = UserRepo::find_by_email(&pool, "ada@test.com")
        .await
        .unwrap()
        .expect("user should be found by email");
    assert_eq!(by_email.id, created.id);

    let by_id = UserRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    let public = UserResponse::from(by_id);
    assert_eq!(public.username, "ada");
    assert_eq!(public.picture.as_deref(), Some("https://example.com/a.png"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_by_email_or_username(pool: PgPool) {
    UserRepo::create(&pool, &new_user("ada", "ada@test.com"))
        .await
        .unwrap();

    let by_username = UserRepo::find_by_email_or_username(&pool, "other@test.com", "ada")
        .await
        .unwrap();
    assert_eq!(by_username.unwrap().email, "ada@test.com");

    let none = UserRepo::find_by_email_or_username(&pool, "other@test.com", "other")
        .await
        .unwrap();
    assert!(none.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_email_violates_unique_constraint(pool: PgPool) {
    UserRepo::create(&pool, &new_user("ada", "ada@test.com"))
        .await
        .unwrap();

    let err = UserRepo::create(&pool, &new_user("ada2", "ada@test.com"))
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("should be a database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert_eq!(db_err.constraint(), Some("uq_users_email"));
}
