//! Repository layer — plain SQL over the SQLite pool.
//!
//! Functions here return raw `sqlx::Error`; the store adapters in
//! [`crate::db::stores`] translate those into application errors.

pub mod reservation;
pub mod restaurant;
pub mod settings;
pub mod user;
