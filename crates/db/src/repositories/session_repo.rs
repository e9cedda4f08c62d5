//! Repository for the `sessions` table.

use sketchboard_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::session::{SessionOwnerRow, SessionRow};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, expires_at";

/// Provides CRUD operations for sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session, returning the created row.
    ///
    /// A duplicate `id` surfaces as a unique-violation database error.
    pub async fn create(
        pool: &PgPool,
        id: &str,
        user_id: DbId,
        expires_at: Timestamp,
    ) -> Result<SessionRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions (id, user_id, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SessionRow>(&query)
            .bind(id)
            .bind(user_id)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find a session by id together with its owner's public columns.
    ///
    /// Expiry is not filtered here; the validator decides what an expired
    /// row means.
    pub async fn find_with_owner(
        pool: &PgPool,
        id: &str,
    ) -> Result<Option<SessionOwnerRow>, sqlx::Error> {
        sqlx::query_as::<_, SessionOwnerRow>(
            "SELECT s.id AS session_id, s.user_id AS session_user_id,
                    s.expires_at AS session_expires_at,
                    u.id AS user_id, u.username, u.email, u.verified, u.picture
             FROM sessions s
             JOIN users u ON s.user_id = u.id
             WHERE s.id = $1
             LIMIT 1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Find a bare session row by id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<SessionRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sessions WHERE id = $1");
        sqlx::query_as::<_, SessionRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Set a new expiry. Returns the number of rows updated (0 if the session is gone).
    pub async fn update_expiry(
        pool: &PgPool,
        id: &str,
        expires_at: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE sessions SET expires_at = $1 WHERE id = $2")
            .bind(expires_at)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete a session. Returns the number of rows deleted (0 if already absent).
    pub async fn delete(pool: &PgPool, id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete all sessions for a user. Returns the count of deleted sessions.
    pub async fn delete_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
