//! Reservation Model and Lifecycle
//!
//! A reservation is created directly into `PENDING` or `CONFIRMED`
//! (depending on the restaurant's acceptance mode) and then moves through
//! a small state machine:
//!
//! ```text
//! PENDING ──accept()──▶ CONFIRMED
//! PENDING ──reject()──▶ REJECTED   (terminal)
//! PENDING | CONFIRMED ──cancel()──▶ CANCELLED (terminal)
//! ```
//!
//! Transitions mutate the loaded entity in memory; persistence is an
//! explicit separate step by the caller.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::serde_helpers;
use crate::error::{AppError, AppResult};

/// Reservation lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Rejected,
    Cancelled,
}

/// Reservation entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reservation {
    pub id: String,
    pub restaurant_id: String,
    /// Requested calendar date (local to the restaurant)
    pub date: NaiveDate,
    /// Requested time of day, `HH:mm`
    #[serde(with = "serde_helpers::hhmm")]
    pub time: NaiveTime,
    pub number_of_people: u32,
    pub customer_name: String,
    pub customer_last_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub notes: Option<String>,
    pub status: ReservationStatus,
    pub rejection_reason: Option<String>,
    /// Opaque token for unauthenticated self-service cancellation.
    /// Issued once at creation, never regenerated.
    pub cancellation_token: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create reservation payload (booking request intake)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCreate {
    pub restaurant_id: String,
    pub date: NaiveDate,
    #[serde(with = "serde_helpers::hhmm")]
    pub time: NaiveTime,
    pub number_of_people: u32,
    pub customer_name: String,
    pub customer_last_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub notes: Option<String>,
}

impl Reservation {
    /// Construct a new reservation with a fresh id and cancellation token.
    pub fn create(input: &ReservationCreate, status: ReservationStatus) -> Self {
        let now = crate::util::now_millis();
        Self {
            id: crate::util::new_id(),
            restaurant_id: input.restaurant_id.clone(),
            date: input.date,
            time: input.time,
            number_of_people: input.number_of_people,
            customer_name: input.customer_name.clone(),
            customer_last_name: input.customer_last_name.clone(),
            customer_email: input.customer_email.clone(),
            customer_phone: input.customer_phone.clone(),
            notes: input.notes.clone(),
            status,
            rejection_reason: None,
            cancellation_token: crate::util::new_token(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this reservation counts toward shift occupancy.
    ///
    /// Pending reservations provisionally reserve capacity; only cancelled
    /// and rejected ones release it.
    pub fn is_active(&self) -> bool {
        !matches!(
            self.status,
            ReservationStatus::Cancelled | ReservationStatus::Rejected
        )
    }

    /// `PENDING → CONFIRMED`
    pub fn accept(&mut self) -> AppResult<()> {
        if self.status != ReservationStatus::Pending {
            return Err(AppError::validation(
                "Only pending reservations can be accepted",
            ));
        }
        self.status = ReservationStatus::Confirmed;
        self.touch();
        Ok(())
    }

    /// `PENDING → REJECTED`; the reason is stored and may be empty.
    pub fn reject(&mut self, reason: Option<String>) -> AppResult<()> {
        if self.status != ReservationStatus::Pending {
            return Err(AppError::validation(
                "Only pending reservations can be rejected",
            ));
        }
        self.status = ReservationStatus::Rejected;
        self.rejection_reason = reason.filter(|r| !r.trim().is_empty());
        self.touch();
        Ok(())
    }

    /// `PENDING | CONFIRMED → CANCELLED`
    pub fn cancel(&mut self) -> AppResult<()> {
        if !matches!(
            self.status,
            ReservationStatus::Pending | ReservationStatus::Confirmed
        ) {
            return Err(AppError::validation(
                "Only pending or confirmed reservations can be cancelled",
            ));
        }
        self.status = ReservationStatus::Cancelled;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = crate::util::now_millis();
    }
}
