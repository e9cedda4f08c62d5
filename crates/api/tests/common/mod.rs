#![allow(dead_code)]

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use sketchboard_api::config::ServerConfig;
use sketchboard_api::router::build_app_router;
use sketchboard_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout and non-secure cookies.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        cookie_secure: false,
        min_password_length: 8,
        rate_limit_capacity: 100,
        rate_limit_refill_secs: 1,
    }
}

/// Build the full application router over `pool`, exactly as `main` does.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_config(pool, test_config())
}

pub fn build_test_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    build_app_router(AppState::new(pool, config.clone()), &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

/// GET with `session=<token>` in the `Cookie` header.
pub async fn get_with_session(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(COOKIE, format!("session={token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// JSON POST from the client identified by `forwarded_for`.
pub async fn post_json_from(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    forwarded_for: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header("x-forwarded-for", forwarded_for)
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// GET from the client identified by `forwarded_for`.
pub async fn get_from(app: Router, uri: &str, forwarded_for: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("x-forwarded-for", forwarded_for)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Bodiless POST with `session=<token>` in the `Cookie` header.
pub async fn post_with_session(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(COOKIE, format!("session={token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The full `Set-Cookie` header of the response, if any.
pub fn set_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_string())
}

/// The session token carried by the response's `Set-Cookie` header.
pub fn session_token(response: &Response<Body>) -> Option<String> {
    let cookie = set_cookie(response)?;
    let first = cookie.split(';').next()?;
    let value = first.strip_prefix("session=")?;
    (!value.is_empty()).then(|| value.to_string())
}
