//! Route definitions for the `/auth` resource.

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::middleware::rate_limit::{rate_limit, RateLimit, RateLimiter, READ_COST, WRITE_COST};
use crate::state::AppState;

/// Routes mounted at `/auth`, all behind `limiter`.
///
/// ```text
/// POST /signup      -> signup                             (cost 3)
/// POST /login       -> login                              (cost 3)
/// POST /logout      -> logout (requires session)          (cost 1)
/// POST /logout-all  -> logout_all (requires session)      (cost 1)
/// GET  /session     -> current_session (requires session) (cost 1)
/// ```
pub fn router(limiter: &RateLimiter) -> Router<AppState> {
    let credentials = Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route_layer(from_fn_with_state(
            RateLimit::new(limiter.clone(), WRITE_COST),
            rate_limit,
        ));

    let sessions = Router::new()
        .route("/logout", post(auth::logout))
        .route("/logout-all", post(auth::logout_all))
        .route("/session", get(auth::current_session))
        .route_layer(from_fn_with_state(
            RateLimit::new(limiter.clone(), READ_COST),
            rate_limit,
        ));

    credentials.merge(sessions)
}
