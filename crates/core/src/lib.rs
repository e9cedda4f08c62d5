//! Domain logic for the Sketchboard backend.
//!
//! Zero internal dependencies: nothing here talks to a database or an HTTP
//! stack. Persistence is reached through the [`session::SessionStore`] trait,
//! implemented in `sketchboard-db`.

pub mod accounts;
pub mod encoding;
pub mod error;
pub mod hashing;
pub mod session;
pub mod types;
