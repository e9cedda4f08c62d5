//! Cookie-session lifecycle: token generation, token-to-id hashing, the
//! persistence seam and sliding-expiry validation.
//!
//! - [`token`] -- random token generator and the one-way session id derivation.
//! - [`policy`] -- lifetime and refresh-threshold constants.
//! - [`store`] -- the [`SessionStore`] trait and the records it returns.
//! - [`validator`] -- [`SessionValidator`], the per-request state machine.

pub mod policy;
pub mod store;
pub mod token;
pub mod validator;

pub use policy::{SessionPolicy, SESSION_MAX_AGE_SECS, SESSION_REFRESH_THRESHOLD_SECS};
pub use store::{Session, SessionError, SessionStore, SessionUser, SessionWithOwner};
pub use token::{generate_session_token, session_id_from_token, SESSION_TOKEN_BYTES};
pub use validator::{SessionValidation, SessionValidator};
