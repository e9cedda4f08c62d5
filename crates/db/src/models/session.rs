//! Session rows and the session-with-owner join.

use sketchboard_core::session::{Session, SessionUser, SessionWithOwner};
use sketchboard_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct SessionRow {
    pub id: String,
    pub user_id: DbId,
    pub expires_at: Timestamp,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            expires_at: row.expires_at,
        }
    }
}

/// Flattened `sessions JOIN users` row. Only the user's public columns are selected.
#[derive(Debug, Clone, FromRow)]
pub struct SessionOwnerRow {
    pub session_id: String,
    pub session_user_id: DbId,
    pub session_expires_at: Timestamp,
    pub user_id: DbId,
    pub username: String,
    pub email: String,
    pub verified: bool,
    pub picture: Option<String>,
}

impl From<SessionOwnerRow> for SessionWithOwner {
    fn from(row: SessionOwnerRow) -> Self {
        Self {
            session: Session {
                id: row.session_id,
                user_id: row.session_user_id,
                expires_at: row.session_expires_at,
            },
            user: SessionUser {
                id: row.user_id,
                username: row.username,
                email: row.email,
                verified: row.verified,
                picture: row.picture,
            },
        }
    }
}
