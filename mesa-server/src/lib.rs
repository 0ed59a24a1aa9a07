//! mesa-server — restaurant reservation backend
//!
//! Public booking intake with schedule and capacity admission checks,
//! reservation lifecycle management and email notifications.

pub mod api;
pub mod core;
pub mod db;
pub mod notifications;
pub mod onboarding;
pub mod reservations;
pub mod utils;
