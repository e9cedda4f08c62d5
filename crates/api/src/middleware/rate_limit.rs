//! Per-client token buckets in front of the `/auth` routes.
//!
//! Clients are keyed by the raw `X-Forwarded-For` header value. Requests
//! without that header are not limited. Each bucket holds `capacity` tokens
//! and regains one per `refill_interval`; a request spends its route's cost
//! or is rejected with 429.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use dashmap::DashMap;

use crate::error::{AppError, AppResult};

/// Tokens per client bucket.
pub const DEFAULT_CAPACITY: u32 = 100;

/// Seconds per regained token.
pub const DEFAULT_REFILL_INTERVAL_SECS: u64 = 1;

/// Cost of a credential-checking request (signup, login).
pub const WRITE_COST: u32 = 3;

/// Cost of a session request (lookup, logout).
pub const READ_COST: u32 = 1;

const CLIENT_KEY_HEADER: &str = "x-forwarded-for";

#[derive(Debug)]
struct TokenBucket {
    tokens: u32,
    refilled_at: Instant,
}

/// Shared bucket table. Clones share the same buckets.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    buckets: Arc<DashMap<String, TokenBucket>>,
    capacity: u32,
    refill_interval: Duration,
}

impl RateLimiter {
    pub fn new(capacity: u32, refill_interval: Duration) -> Self {
        Self {
            buckets: Arc::new(DashMap::new()),
            capacity,
            refill_interval: refill_interval.max(Duration::from_millis(1)),
        }
    }

    /// Spend `cost` tokens from `key`'s bucket. Returns `false` when the
    /// bucket cannot cover it; nothing is spent in that case.
    pub fn check_rate_limit(&self, key: &str, cost: u32) -> bool {
        self.check_rate_limit_at(key, cost, Instant::now())
    }

    pub fn check_rate_limit_at(&self, key: &str, cost: u32, now: Instant) -> bool {
        let mut bucket = self
            .buckets
            .entry(key.to_string())
            .or_insert_with(|| TokenBucket {
                tokens: self.capacity,
                refilled_at: now,
            });

        let elapsed = now.saturating_duration_since(bucket.refilled_at);
        let intervals = elapsed.as_nanos() / self.refill_interval.as_nanos();
        if intervals > 0 {
            let refilled = u128::from(bucket.tokens) + intervals;
            if refilled >= u128::from(self.capacity) {
                bucket.tokens = self.capacity;
                bucket.refilled_at = now;
            } else {
                // refilled < capacity, so intervals fits in a u32.
                bucket.tokens = refilled as u32;
                bucket.refilled_at += self.refill_interval * intervals as u32;
            }
        }

        if bucket.tokens < cost {
            return false;
        }
        bucket.tokens -= cost;
        true
    }
}

/// Middleware state: the shared limiter plus the cost of the routes it guards.
#[derive(Debug, Clone)]
pub struct RateLimit {
    limiter: RateLimiter,
    cost: u32,
}

impl RateLimit {
    pub fn new(limiter: RateLimiter, cost: u32) -> Self {
        Self { limiter, cost }
    }
}

/// Reject the request with 429 when its client's bucket is empty.
pub async fn rate_limit(
    State(limit): State<RateLimit>,
    request: Request,
    next: Next,
) -> AppResult<Response> {
    let limited = request
        .headers()
        .get(CLIENT_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|key| !limit.limiter.check_rate_limit(key, limit.cost));

    if limited {
        tracing::warn!(cost = limit.cost, path = %request.uri().path(), "Rate limit exceeded");
        return Err(AppError::TooManyRequests);
    }

    Ok(next.run(request).await)
}
