//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`cookie`] -- `Set-Cookie` construction and parsing for the session token.

pub mod cookie;
pub mod password;
