use sketchboard_core::accounts::DEFAULT_MIN_PASSWORD_LENGTH;

use crate::middleware::rate_limit::{DEFAULT_CAPACITY, DEFAULT_REFILL_INTERVAL_SECS};

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Whether the session cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
    /// Minimum password length enforced at sign-up.
    pub min_password_length: usize,
    /// Tokens per client in the `/auth` rate limiter.
    pub rate_limit_capacity: u32,
    /// Seconds for one token to return to a client's bucket.
    pub rate_limit_refill_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                          |
    /// |--------------------------|----------------------------------|
    /// | `HOST`                   | `0.0.0.0`                        |
    /// | `PORT`                   | `3000`                           |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`          |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                             |
    /// | `APP_ENV`                | `development`                    |
    /// | `COOKIE_SECURE`          | `true` iff `APP_ENV=production`  |
    /// | `MIN_PASSWORD_LENGTH`    | `8`                              |
    /// | `RATE_LIMIT_CAPACITY`    | `100`                            |
    /// | `RATE_LIMIT_REFILL_SECS` | `1` (must be positive)           |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let cookie_secure: bool = match std::env::var("COOKIE_SECURE") {
            Ok(v) => v.parse().expect("COOKIE_SECURE must be true or false"),
            Err(_) => is_production(&app_env),
        };

        let min_password_length: usize = std::env::var("MIN_PASSWORD_LENGTH")
            .unwrap_or_else(|_| DEFAULT_MIN_PASSWORD_LENGTH.to_string())
            .parse()
            .expect("MIN_PASSWORD_LENGTH must be a valid usize");

        let rate_limit_capacity: u32 = std::env::var("RATE_LIMIT_CAPACITY")
            .unwrap_or_else(|_| DEFAULT_CAPACITY.to_string())
            .parse()
            .expect("RATE_LIMIT_CAPACITY must be a valid u32");

        let rate_limit_refill_secs: u64 = std::env::var("RATE_LIMIT_REFILL_SECS")
            .unwrap_or_else(|_| DEFAULT_REFILL_INTERVAL_SECS.to_string())
            .parse()
            .ok()
            .filter(|&secs| secs > 0)
            .expect("RATE_LIMIT_REFILL_SECS must be a positive integer");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            cookie_secure,
            min_password_length,
            rate_limit_capacity,
            rate_limit_refill_secs,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn is_production(app_env: &str) -> bool {
    app_env.eq_ignore_ascii_case("production")
}
