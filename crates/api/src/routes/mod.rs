pub mod auth;
pub mod health;

use axum::Router;

use crate::middleware::rate_limit::RateLimiter;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                                     create account + session (public)
/// /auth/login                                      login (public)
/// /auth/logout                                     logout (requires session)
/// /auth/logout-all                                 revoke all sessions (requires session)
/// /auth/session                                    current user (requires session)
/// ```
///
/// Every `/auth` route is rate limited per `X-Forwarded-For` client.
pub fn api_routes(limiter: &RateLimiter) -> Router<AppState> {
    Router::new().nest("/auth", auth::router(limiter))
}
