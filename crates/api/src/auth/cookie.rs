//! The `session` cookie.
//!
//! The raw session token only ever travels in this cookie. It is `HttpOnly`,
//! `SameSite=Lax`, scoped to `/`, and `Secure` when configured for production.

use axum::http::header::COOKIE;
use axum::http::{HeaderMap, HeaderValue};
use sketchboard_core::types::Timestamp;

use crate::error::AppError;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE_NAME: &str = "session";

/// IMF-fixdate, the format `Expires` requires.
const EXPIRES_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// `Set-Cookie` value binding `token` to the client until `expires_at`.
pub fn session_cookie(token: &str, expires_at: Timestamp, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax; Expires={}",
        expires_at.format(EXPIRES_FORMAT)
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie(secure: bool) -> String {
    let mut cookie =
        format!("{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Read the session token from the request's `Cookie` header(s).
///
/// An empty value is treated as absent.
pub fn session_token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE_NAME)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Convert a cookie string into a header value.
pub fn to_header_value(cookie: String) -> Result<HeaderValue, AppError> {
    HeaderValue::try_from(cookie)
        .map_err(|e| AppError::InternalError(format!("Invalid Set-Cookie value: {e}")))
}
