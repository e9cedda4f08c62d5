//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` struct matching the database row and
//! the create DTO used for inserts.

pub mod session;
pub mod user;
