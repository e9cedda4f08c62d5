//! Account input rules shared by sign-up and login.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Emails must be strictly shorter than this many characters.
pub const MAX_EMAIL_LENGTH: usize = 256;

/// Default minimum password length for new accounts.
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 8;

/// Username prefixes reserved for accounts created through social login.
pub const RESERVED_USERNAME_PREFIXES: &[&str] = &["google-", "github-"];

const EMAIL_PATTERN: &str = r"^.+@.+\..+$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Loose shape check: something, `@`, something, `.`, something.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.is_empty() {
        return Err(CoreError::Validation("Email is required".into()));
    }
    if email.chars().count() >= MAX_EMAIL_LENGTH || !EMAIL_RE.is_match(email) {
        return Err(CoreError::Validation("Invalid email".into()));
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), CoreError> {
    if username.is_empty() {
        return Err(CoreError::Validation("Username is required".into()));
    }
    if username.contains(' ') {
        return Err(CoreError::Validation(
            "Username should not contain spaces.".into(),
        ));
    }
    if RESERVED_USERNAME_PREFIXES
        .iter()
        .any(|prefix| username.starts_with(prefix))
    {
        return Err(CoreError::Validation(
            "Username cannot start with 'google-' or 'github-'.".into(),
        ));
    }
    Ok(())
}

/// Enforce a minimum length on a new password.
pub fn validate_new_password(password: &str, min_length: usize) -> Result<(), CoreError> {
    if password.is_empty() {
        return Err(CoreError::Validation("Password is required".into()));
    }
    if password.chars().count() < min_length {
        return Err(CoreError::Validation(format!(
            "Password must be at least {min_length} characters long"
        )));
    }
    Ok(())
}
