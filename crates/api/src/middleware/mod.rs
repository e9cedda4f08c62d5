//! Request extractors.
//!
//! - [`auth::AuthSession`] -- Resolves the `session` cookie to a live session and its owner.
//! - [`rate_limit::rate_limit`] -- Token-bucket limiting keyed by `X-Forwarded-For`.

pub mod auth;
pub mod rate_limit;
