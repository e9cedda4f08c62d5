//! PostgreSQL-backed [`SessionStore`].

use sketchboard_core::session::{Session, SessionError, SessionStore, SessionWithOwner};
use sketchboard_core::types::{DbId, Timestamp};

use crate::repositories::SessionRepo;
use crate::DbPool;

/// PostgreSQL unique-violation SQLSTATE.
const UNIQUE_VIOLATION: &str = "23505";

/// Session store over the shared connection pool.
///
/// Cheap to clone; every clone shares the same pool.
#[derive(Debug, Clone)]
pub struct PgSessionStore {
    pool: DbPool,
}

impl PgSessionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map a sqlx error to the session taxonomy.
///
/// The only unique constraint on `sessions` is the primary key, so a unique
/// violation is an id collision.
fn classify(err: sqlx::Error) -> SessionError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return SessionError::Conflict("session id already exists".into());
        }
    }
    SessionError::Store(Box::new(err))
}

impl SessionStore for PgSessionStore {
    async fn create(
        &self,
        session_id: &str,
        user_id: DbId,
        expires_at: Timestamp,
    ) -> Result<Session, SessionError> {
        let row = SessionRepo::create(&self.pool, session_id, user_id, expires_at)
            .await
            .map_err(|e| {
                let err = classify(e);
                if matches!(err, SessionError::Conflict(_)) {
                    tracing::error!(user_id, "Session id collision on insert");
                }
                err
            })?;
        tracing::debug!(user_id, expires_at = %row.expires_at, "Session created");
        Ok(row.into())
    }

    async fn find_with_owner(
        &self,
        session_id: &str,
    ) -> Result<Option<SessionWithOwner>, SessionError> {
        let row = SessionRepo::find_with_owner(&self.pool, session_id)
            .await
            .map_err(classify)?;
        Ok(row.map(Into::into))
    }

    async fn update_expiry(
        &self,
        session_id: &str,
        expires_at: Timestamp,
    ) -> Result<u64, SessionError> {
        let updated = SessionRepo::update_expiry(&self.pool, session_id, expires_at)
            .await
            .map_err(classify)?;
        if updated == 0 {
            tracing::debug!("Session vanished before its expiry could be extended");
        }
        Ok(updated)
    }

    async fn delete(&self, session_id: &str) -> Result<u64, SessionError> {
        SessionRepo::delete(&self.pool, session_id)
            .await
            .map_err(classify)
    }

    async fn delete_all_for_user(&self, user_id: DbId) -> Result<u64, SessionError> {
        let deleted = SessionRepo::delete_all_for_user(&self.pool, user_id)
            .await
            .map_err(classify)?;
        tracing::info!(user_id, deleted, "Deleted all sessions for user");
        Ok(deleted)
    }
}
