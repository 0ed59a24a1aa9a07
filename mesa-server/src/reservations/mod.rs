//! Booking intake and reservation lifecycle.

pub mod service;
pub mod validator;

#[cfg(test)]
mod tests;

pub use service::ReservationService;
