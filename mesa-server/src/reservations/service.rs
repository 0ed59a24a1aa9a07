//! Reservation use cases: admission, cancellation and the restaurant's
//! accept/reject decisions.

use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;
use shared::models::{AcceptanceMode, Reservation, ReservationCreate, ReservationStatus, Restaurant};
use shared::{AppError, AppResult};
use std::sync::Arc;

use crate::db::ports::{ReservationStore, RestaurantStore, SettingsStore};
use crate::notifications::Notifier;
use crate::utils::{time, validation};

use super::validator;

/// Customer-facing success messages for the intake outcome.
pub const MSG_CONFIRMED: &str = "Reservation confirmed successfully";
pub const MSG_RECEIVED: &str =
    "Reservation request received. You will be notified once the restaurant confirms";
pub const MSG_CANCELLED: &str = "Reservation cancelled successfully";

pub struct ReservationService {
    restaurants: Arc<dyn RestaurantStore>,
    settings: Arc<dyn SettingsStore>,
    reservations: Arc<dyn ReservationStore>,
    notifier: Notifier,
    timezone: Tz,
}

impl ReservationService {
    pub fn new(
        restaurants: Arc<dyn RestaurantStore>,
        settings: Arc<dyn SettingsStore>,
        reservations: Arc<dyn ReservationStore>,
        notifier: Notifier,
        timezone: Tz,
    ) -> Self {
        Self {
            restaurants,
            settings,
            reservations,
            notifier,
            timezone,
        }
    }

    /// Admit a booking request.
    ///
    /// Runs the admission checks in order against the restaurant's current
    /// schedule and occupancy, persists the reservation in the status the
    /// acceptance mode dictates, and fires the notification emails. Returns
    /// the stored reservation and the message to show the customer.
    pub async fn create(
        &self,
        input: ReservationCreate,
    ) -> AppResult<(Reservation, &'static str)> {
        validate_payload(&input)?;

        let restaurant = self.load_accepting_restaurant(&input.restaurant_id).await?;
        let settings = self
            .settings
            .find_by_restaurant(&restaurant.id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "Settings for restaurant with id {} not found",
                    restaurant.id
                ))
            })?;

        validator::validate_group_size(input.number_of_people)?;
        validator::validate_minimum_advance_time(
            input.date,
            input.time,
            time::local_now(self.timezone),
        )?;
        let shifts = settings.opening_hours.day(input.date.weekday());
        let shift = validator::validate_opening_hours(input.date, input.time, shifts)?;
        validator::validate_time_slot_interval(input.time, settings.time_slot_interval)?;

        let same_day = self
            .reservations
            .find_by_restaurant_and_date(&restaurant.id, input.date)
            .await?;
        validator::validate_capacity(&same_day, shift, input.number_of_people)?;

        let (status, message) = match settings.acceptance_mode {
            AcceptanceMode::Auto => (ReservationStatus::Confirmed, MSG_CONFIRMED),
            AcceptanceMode::Manual => (ReservationStatus::Pending, MSG_RECEIVED),
        };
        let reservation = Reservation::create(&input, status);
        self.reservations.save(&reservation).await?;

        tracing::info!(
            reservation_id = %reservation.id,
            restaurant_id = %restaurant.id,
            status = ?reservation.status,
            "Reservation admitted"
        );

        let auto_confirmed = status == ReservationStatus::Confirmed;
        if auto_confirmed {
            self.notifier.reservation_confirmed(&reservation, &restaurant);
        } else {
            self.notifier.reservation_received(&reservation, &restaurant);
        }
        self.notifier
            .new_reservation_alert(&reservation, &restaurant, auto_confirmed);

        Ok((reservation, message))
    }

    /// Self-service cancellation by the opaque token from the confirmation
    /// email. An unknown token and a known-but-spent one are
    /// indistinguishable to the caller.
    pub async fn cancel_by_token(&self, token: &str) -> AppResult<(Reservation, &'static str)> {
        let mut reservation = self
            .reservations
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::not_found("Reservation not found or token is invalid"))?;

        // A reservation without its restaurant is a data-integrity fault
        let restaurant = self
            .restaurants
            .find_by_id(&reservation.restaurant_id)
            .await?
            .ok_or_else(|| AppError::not_found("Restaurant not found"))?;

        reservation.cancel()?;
        self.reservations.save(&reservation).await?;

        tracing::info!(reservation_id = %reservation.id, "Reservation cancelled by customer");

        self.notifier.reservation_cancelled(&reservation, &restaurant);

        Ok((reservation, MSG_CANCELLED))
    }

    /// Restaurant decision: `PENDING → CONFIRMED`.
    pub async fn accept(&self, id: &str) -> AppResult<Reservation> {
        let mut reservation = self.load_reservation(id).await?;
        reservation.accept()?;
        self.reservations.save(&reservation).await?;

        tracing::info!(reservation_id = %reservation.id, "Reservation accepted");

        if let Some(restaurant) = self.restaurants.find_by_id(&reservation.restaurant_id).await? {
            self.notifier.reservation_confirmed(&reservation, &restaurant);
        }
        Ok(reservation)
    }

    /// Restaurant decision: `PENDING → REJECTED`, with an optional reason
    /// forwarded to the customer.
    pub async fn reject(&self, id: &str, reason: Option<String>) -> AppResult<Reservation> {
        validation::validate_optional_text(&reason, "reason", validation::MAX_NOTE_LEN)?;

        let mut reservation = self.load_reservation(id).await?;
        reservation.reject(reason)?;
        self.reservations.save(&reservation).await?;

        tracing::info!(reservation_id = %reservation.id, "Reservation rejected");

        if let Some(restaurant) = self.restaurants.find_by_id(&reservation.restaurant_id).await? {
            self.notifier.reservation_rejected(&reservation, &restaurant);
        }
        Ok(reservation)
    }

    /// Day sheet: every reservation for the restaurant on a date,
    /// regardless of status.
    pub async fn list_for_day(
        &self,
        restaurant_id: &str,
        date: NaiveDate,
    ) -> AppResult<Vec<Reservation>> {
        if self.restaurants.find_by_id(restaurant_id).await?.is_none() {
            return Err(AppError::not_found("Restaurant not found"));
        }
        self.reservations
            .find_by_restaurant_and_date(restaurant_id, date)
            .await
    }

    async fn load_reservation(&self, id: &str) -> AppResult<Reservation> {
        self.reservations
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Reservation not found"))
    }

    async fn load_accepting_restaurant(&self, id: &str) -> AppResult<Restaurant> {
        let restaurant = self
            .restaurants
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Restaurant not found"))?;
        if !restaurant.is_active {
            return Err(AppError::validation(
                "This restaurant is not accepting reservations",
            ));
        }
        Ok(restaurant)
    }
}

fn validate_payload(input: &ReservationCreate) -> AppResult<()> {
    // Intake bound; the admission engine applies its own stricter ceiling
    if !(1..=20).contains(&input.number_of_people) {
        return Err(AppError::validation(
            "number_of_people must be between 1 and 20",
        ));
    }
    validation::validate_required_text(&input.customer_name, "customer_name", validation::MAX_NAME_LEN)?;
    validation::validate_required_text(
        &input.customer_last_name,
        "customer_last_name",
        validation::MAX_NAME_LEN,
    )?;
    validation::validate_email(&input.customer_email, "customer_email")?;
    validation::validate_required_text(
        &input.customer_phone,
        "customer_phone",
        validation::MAX_SHORT_TEXT_LEN,
    )?;
    validation::validate_optional_text(&input.notes, "notes", validation::MAX_NOTE_LEN)?;
    Ok(())
}
