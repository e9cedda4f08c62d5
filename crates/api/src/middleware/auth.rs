//! Cookie-session authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sketchboard_core::session::{Session, SessionUser, SessionValidation};

use crate::auth::cookie::session_token_from_headers;
use crate::error::AppError;
use crate::state::AppState;

/// A live session resolved from the `session` cookie.
///
/// Use this as an extractor parameter in any handler that requires authentication:
///
/// ```ignore
/// async fn my_handler(auth: AuthSession) -> AppResult<Json<()>> {
///     tracing::info!(user_id = auth.user.id, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// Missing, unknown and expired sessions are all rejected with the same 401.
#[derive(Clone)]
pub struct AuthSession {
    /// Raw token from the cookie, needed to re-issue it after a refresh.
    pub token: String,
    pub session: Session,
    pub user: SessionUser,
    /// Whether validation extended the session's expiry.
    pub refreshed: bool,
}

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token =
            session_token_from_headers(&parts.headers).ok_or_else(AppError::not_authenticated)?;

        let validation = state.sessions.validate(Some(token.as_str())).await?;
        match validation {
            SessionValidation::Valid {
                session,
                user,
                refreshed,
            } => Ok(AuthSession {
                token,
                session,
                user,
                refreshed,
            }),
            SessionValidation::Invalid => Err(AppError::not_authenticated()),
        }
    }
}
