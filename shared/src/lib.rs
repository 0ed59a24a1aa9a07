//! Shared types for the Mesa booking backend
//!
//! Common types used across the workspace: domain models, the reservation
//! lifecycle, the unified error/response types and small utilities.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResponse, AppResult};
pub use serde::{Deserialize, Serialize};
