//! Session token generation and session id derivation.
//!
//! The raw token lives only in the client's cookie. The server stores the
//! SHA-256 of it as the session id, so a leaked `sessions` table cannot be
//! turned back into working cookies.

use rand::Rng;

use crate::encoding::base32_lower_no_pad;
use crate::hashing::sha256_hex;

/// Bytes of entropy in a session token (160 bits).
pub const SESSION_TOKEN_BYTES: usize = 20;

/// Generate a new random session token.
///
/// 20 bytes from the thread-local CSPRNG, encoded as 32 lowercase base-32
/// characters. The value is handed to the cookie binder and never persisted.
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; SESSION_TOKEN_BYTES];
    rand::rng().fill(&mut bytes);
    base32_lower_no_pad(&bytes)
}

/// Derive the storage id of a session from its raw token.
///
/// Lowercase hex SHA-256 of the token's UTF-8 bytes. Used both when the
/// session is created and on every lookup.
pub fn session_id_from_token(token: &str) -> String {
    sha256_hex(token.as_bytes())
}
