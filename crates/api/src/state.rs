use std::sync::Arc;
use std::time::Duration;

use sketchboard_core::session::SessionValidator;
use sketchboard_db::PgSessionStore;

use crate::config::ServerConfig;
use crate::middleware::rate_limit::RateLimiter;

/// Session validator bound to the PostgreSQL store.
pub type Sessions = SessionValidator<PgSessionStore>;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: sketchboard_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Session issuance and validation, sharing `pool`.
    pub sessions: Arc<Sessions>,
    /// Per-client token buckets for the `/auth` routes.
    pub rate_limiter: RateLimiter,
}

impl AppState {
    /// Wire the session validator onto `pool` and bundle everything handlers need.
    pub fn new(pool: sketchboard_db::DbPool, config: ServerConfig) -> Self {
        let sessions = SessionValidator::new(PgSessionStore::new(pool.clone()));
        let rate_limiter = RateLimiter::new(
            config.rate_limit_capacity,
            Duration::from_secs(config.rate_limit_refill_secs),
        );
        Self {
            pool,
            config: Arc::new(config),
            sessions: Arc::new(sessions),
            rate_limiter,
        }
    }
}
