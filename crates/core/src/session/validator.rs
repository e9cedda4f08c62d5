//! Per-request session validation with sliding expiry.
//!
//! ```text
//! no token                        -> Invalid
//! token, no row                   -> Invalid
//! token, row, now >= expires_at   -> delete row, Invalid
//! token, row, inside refresh gap  -> expires_at = now + max_age, Valid (refreshed)
//! token, row, otherwise           -> Valid
//! ```
//!
//! Store failures are returned as-is. Callers decide whether a broken store
//! means "not authenticated" or a 500.

use chrono::Utc;

use super::policy::SessionPolicy;
use super::store::{Session, SessionError, SessionStore, SessionUser};
use super::token::session_id_from_token;
use crate::types::{DbId, Timestamp};

/// Outcome of validating a session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionValidation {
    /// The token maps to a live session.
    Valid {
        session: Session,
        user: SessionUser,
        /// Set when this call extended `session.expires_at`; the cookie
        /// should be re-issued with the new expiry.
        refreshed: bool,
    },
    /// No token, unknown token, or expired session. These are deliberately
    /// indistinguishable.
    Invalid,
}

impl SessionValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// Split into `(session, user)`, or `None` when invalid.
    pub fn into_parts(self) -> Option<(Session, SessionUser)> {
        match self {
            Self::Valid { session, user, .. } => Some((session, user)),
            Self::Invalid => None,
        }
    }
}

/// Issues, validates and revokes sessions against an injected store.
///
/// Construct once at startup and share (e.g. behind an `Arc`).
#[derive(Debug)]
pub struct SessionValidator<S> {
    store: S,
    policy: SessionPolicy,
}

impl<S: SessionStore> SessionValidator<S> {
    /// Validator using the default 30-day / 15-day policy.
    pub fn new(store: S) -> Self {
        Self::with_policy(store, SessionPolicy::default())
    }

    pub fn with_policy(store: S, policy: SessionPolicy) -> Self {
        Self { store, policy }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist a session for `token` owned by `user_id`, expiring one full
    /// lifetime from now.
    pub async fn create_session(
        &self,
        token: &str,
        user_id: DbId,
    ) -> Result<Session, SessionError> {
        self.create_session_at(token, user_id, Utc::now()).await
    }

    pub async fn create_session_at(
        &self,
        token: &str,
        user_id: DbId,
        now: Timestamp,
    ) -> Result<Session, SessionError> {
        let session_id = session_id_from_token(token);
        let expires_at = self.policy.expiry_from(now);
        self.store.create(&session_id, user_id, expires_at).await
    }

    /// Validate the token carried by the inbound cookie, if any.
    pub async fn validate(&self, token: Option<&str>) -> Result<SessionValidation, SessionError> {
        self.validate_at(token, Utc::now()).await
    }

    pub async fn validate_at(
        &self,
        token: Option<&str>,
        now: Timestamp,
    ) -> Result<SessionValidation, SessionError> {
        let Some(token) = token else {
            return Ok(SessionValidation::Invalid);
        };

        let session_id = session_id_from_token(token);
        let Some(found) = self.store.find_with_owner(&session_id).await? else {
            return Ok(SessionValidation::Invalid);
        };

        let mut session = found.session;

        if self.policy.is_expired(session.expires_at, now) {
            self.store.delete(&session.id).await?;
            return Ok(SessionValidation::Invalid);
        }

        let refreshed = self.policy.needs_refresh(session.expires_at, now);
        if refreshed {
            session.expires_at = self.policy.expiry_from(now);
            self.store
                .update_expiry(&session.id, session.expires_at)
                .await?;
        }

        Ok(SessionValidation::Valid {
            session,
            user: found.user,
            refreshed,
        })
    }

    /// Delete one session by id. Idempotent.
    pub async fn invalidate_session(&self, session_id: &str) -> Result<u64, SessionError> {
        self.store.delete(session_id).await
    }

    /// Delete every session owned by `user_id`.
    pub async fn invalidate_user_sessions(&self, user_id: DbId) -> Result<u64, SessionError> {
        self.store.delete_all_for_user(user_id).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
