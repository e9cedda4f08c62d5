//! Session lifetime policy.
//!
//! Sessions live for [`SESSION_MAX_AGE_SECS`]. Once fewer than
//! [`SESSION_REFRESH_THRESHOLD_SECS`] remain, the next successful validation
//! pushes the expiry out to a full lifetime again, so an active user only
//! costs one write per half-lifetime.

use chrono::Duration;

use crate::types::Timestamp;

/// Absolute session lifetime: 30 days.
pub const SESSION_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 30;

/// Remaining lifetime below which a session is renewed: 15 days.
pub const SESSION_REFRESH_THRESHOLD_SECS: i64 = 60 * 60 * 24 * 15;

/// Lifetime and renewal window applied by the session validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    pub max_age: Duration,
    pub refresh_threshold: Duration,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            max_age: Duration::seconds(SESSION_MAX_AGE_SECS),
            refresh_threshold: Duration::seconds(SESSION_REFRESH_THRESHOLD_SECS),
        }
    }
}

impl SessionPolicy {
    /// Expiry for a session created or renewed at `now`.
    pub fn expiry_from(&self, now: Timestamp) -> Timestamp {
        now + self.max_age
    }

    /// `true` once `now` has reached `expires_at`.
    pub fn is_expired(&self, expires_at: Timestamp, now: Timestamp) -> bool {
        now >= expires_at
    }

    /// `true` once the session is inside the renewal window.
    pub fn needs_refresh(&self, expires_at: Timestamp, now: Timestamp) -> bool {
        now >= expires_at - self.refresh_threshold
    }
}
