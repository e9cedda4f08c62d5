//! User entity model and DTOs.

use serde::Serialize;
use sketchboard_core::session::SessionUser;
use sketchboard_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    /// `None` for accounts created through social login.
    pub password_hash: Option<String>,
    pub verified: bool,
    pub picture: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub verified: bool,
    pub picture: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            verified: user.verified,
            picture: user.picture,
        }
    }
}

impl From<SessionUser> for UserResponse {
    fn from(user: SessionUser) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            verified: user.verified,
            picture: user.picture,
        }
    }
}

/// DTO for creating a new user.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub verified: bool,
    pub picture: Option<String>,
}
