//! Domain errors raised by account and session rules.
//!
//! Session store failures have their own type, [`crate::session::SessionError`].

/// A rule violation the caller can report back to the client.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Malformed or missing input (email, username, password).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The email or username already belongs to another account.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Bad credentials or no live session.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}
