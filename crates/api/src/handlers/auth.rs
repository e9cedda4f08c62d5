//! Handlers for the `/auth` resource (signup, login, logout, session).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use sketchboard_core::accounts::{validate_email, validate_new_password, validate_username};
use sketchboard_core::error::CoreError;
use sketchboard_core::session::generate_session_token;
use sketchboard_core::types::{DbId, Timestamp};
use sketchboard_db::models::user::{CreateUser, UserResponse};
use sketchboard_db::repositories::UserRepo;

use crate::auth::cookie::{clear_session_cookie, session_cookie, to_header_value};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthSession;
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid email or password";
const EMAIL_TAKEN: &str = "Email is already in use";
const USERNAME_TAKEN: &str = "Username is already taken";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response for signup, login and the current-session lookup.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: UserResponse,
    pub expires_at: Timestamp,
}

/// Response for `POST /auth/logout-all`.
#[derive(Debug, Serialize)]
pub struct RevokedResponse {
    pub revoked: u64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Create a password account and sign it in. Returns 201 with the session cookie set.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<Response> {
    let email = input.email.as_str();
    let username = input.username.as_str();

    validate_email(email)?;
    validate_username(username)?;
    validate_new_password(&input.password, state.config.min_password_length)?;

    let existing = UserRepo::find_by_email_or_username(&state.pool, email, username).await?;
    if let Some(existing) = existing {
        let msg = if existing.email == email {
            EMAIL_TAKEN
        } else {
            USERNAME_TAKEN
        };
        return Err(AppError::Core(CoreError::Conflict(msg.into())));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: Some(password_hash),
            verified: false,
            picture: None,
        },
    )
    .await
    .map_err(signup_conflict)?;
    tracing::info!(user_id = user.id, "User signed up");

    let (cookie, expires_at) = start_session(&state, user.id).await?;

    Ok((
        StatusCode::CREATED,
        [(SET_COOKIE, cookie)],
        Json(SessionResponse {
            user: user.into(),
            expires_at,
        }),
    )
        .into_response())
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password and set the session cookie.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Response> {
    let email = input.email.as_str();
    validate_email(email)?;

    let user = UserRepo::find_by_email(&state.pool, email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    // Accounts created through social login have no password to check.
    let Some(password_hash) = user.password_hash.as_deref() else {
        return Err(AppError::Core(CoreError::Unauthorized(
            "This account has no password. Please sign in with Google or GitHub.".into(),
        )));
    };

    let password_valid = verify_password(&input.password, password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    let (cookie, expires_at) = start_session(&state, user.id).await?;
    tracing::info!(user_id = user.id, "User logged in");

    Ok((
        [(SET_COOKIE, cookie)],
        Json(SessionResponse {
            user: user.into(),
            expires_at,
        }),
    )
        .into_response())
}

/// POST /api/v1/auth/logout
///
/// Revoke the current session and clear the cookie. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth: AuthSession) -> AppResult<Response> {
    state.sessions.invalidate_session(&auth.session.id).await?;
    tracing::info!(user_id = auth.user.id, "User logged out");

    let cookie = to_header_value(clear_session_cookie(state.config.cookie_secure))?;
    Ok((StatusCode::NO_CONTENT, [(SET_COOKIE, cookie)]).into_response())
}

/// POST /api/v1/auth/logout-all
///
/// Revoke every session of the current user, on every device.
pub async fn logout_all(State(state): State<AppState>, auth: AuthSession) -> AppResult<Response> {
    let revoked = state.sessions.invalidate_user_sessions(auth.user.id).await?;
    tracing::info!(user_id = auth.user.id, revoked, "User logged out everywhere");

    let cookie = to_header_value(clear_session_cookie(state.config.cookie_secure))?;
    Ok(([(SET_COOKIE, cookie)], Json(RevokedResponse { revoked })).into_response())
}

/// GET /api/v1/auth/session
///
/// Return the signed-in user. Re-issues the cookie when the session was renewed.
pub async fn current_session(
    State(state): State<AppState>,
    auth: AuthSession,
) -> AppResult<Response> {
    let expires_at = auth.session.expires_at;
    let mut response = Json(SessionResponse {
        user: auth.user.into(),
        expires_at,
    })
    .into_response();

    if auth.refreshed {
        let cookie = session_cookie(&auth.token, expires_at, state.config.cookie_secure);
        response
            .headers_mut()
            .insert(SET_COOKIE, to_header_value(cookie)?);
    }

    Ok(response)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Translate a user insert that lost a race on `uq_users_email` or
/// `uq_users_username` into the same conflict the pre-check reports.
pub fn signup_conflict(err: sqlx::Error) -> AppError {
    let message = match &err {
        sqlx::Error::Database(db_err) => match db_err.constraint() {
            Some("uq_users_email") => Some(EMAIL_TAKEN),
            Some("uq_users_username") => Some(USERNAME_TAKEN),
            _ => None,
        },
        _ => None,
    };
    match message {
        Some(msg) => AppError::Core(CoreError::Conflict(msg.into())),
        None => AppError::Database(err),
    }
}

/// Generate a token, persist its session, and build the cookie binding it.
async fn start_session(
    state: &AppState,
    user_id: DbId,
) -> AppResult<(axum::http::HeaderValue, Timestamp)> {
    let token = generate_session_token();
    let session = state.sessions.create_session(&token, user_id).await?;
    let cookie = session_cookie(&token, session.expires_at, state.config.cookie_secure);
    Ok((to_header_value(cookie)?, session.expires_at))
}
