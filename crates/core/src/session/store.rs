//! Persistence seam for sessions.
//!
//! The validator only ever talks to a [`SessionStore`]. The PostgreSQL
//! implementation lives in `sketchboard-db`; tests use an in-memory one.

use std::future::Future;

use serde::Serialize;

use crate::types::{DbId, Timestamp};

/// A persisted session row.
///
/// `id` is the hashed token (see [`super::session_id_from_token`]), never the
/// token itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub user_id: DbId,
    pub expires_at: Timestamp,
}

/// Public fields of the user owning a session. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUser {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub verified: bool,
    pub picture: Option<String>,
}

/// A session joined with its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionWithOwner {
    pub session: Session,
    pub user: SessionUser,
}

/// Failures surfaced by a [`SessionStore`].
///
/// A missing session is not an error; lookups return `Ok(None)` for that.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A session with the same id already exists.
    #[error("Session id conflict: {0}")]
    Conflict(String),

    /// The backing store failed (connection loss, query error, ...).
    #[error("Session store failure: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Storage operations required by the session validator.
///
/// Implementations must use parameterized queries and must not retry or
/// swallow backend failures.
pub trait SessionStore: Send + Sync {
    /// Persist a new session. Fails with [`SessionError::Conflict`] if `session_id`
    /// is already taken.
    fn create(
        &self,
        session_id: &str,
        user_id: DbId,
        expires_at: Timestamp,
    ) -> impl Future<Output = Result<Session, SessionError>> + Send;

    /// Look up a session together with its owner's public fields.
    fn find_with_owner(
        &self,
        session_id: &str,
    ) -> impl Future<Output = Result<Option<SessionWithOwner>, SessionError>> + Send;

    /// Move a session's expiry. Returns rows affected; `0` when the session is gone.
    fn update_expiry(
        &self,
        session_id: &str,
        expires_at: Timestamp,
    ) -> impl Future<Output = Result<u64, SessionError>> + Send;

    /// Remove a session. Returns rows affected; `0` when already absent.
    fn delete(&self, session_id: &str) -> impl Future<Output = Result<u64, SessionError>> + Send;

    /// Remove every session owned by `user_id`. Returns rows affected.
    fn delete_all_for_user(
        &self,
        user_id: DbId,
    ) -> impl Future<Output = Result<u64, SessionError>> + Send;
}
