//! Use-case tests for the booking flow, run against in-memory stores and
//! a recording mailer.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use shared::AppResult;
use shared::models::{
    AcceptanceMode, OpeningHours, Reservation, ReservationCreate, ReservationStatus, Restaurant,
    Settings, SettingsUpdate, Shift, TimeSlotInterval,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::db::ports::{ReservationStore, RestaurantStore, SettingsStore};
use crate::notifications::{Mailer, Notifier};

use super::service::{MSG_CANCELLED, MSG_CONFIRMED, MSG_RECEIVED, ReservationService};

const TZ: Tz = chrono_tz::Europe::Madrid;

// ---------------------------------------------------------------- doubles

#[derive(Default)]
struct MemRestaurants(Mutex<HashMap<String, Restaurant>>);

#[async_trait]
impl RestaurantStore for MemRestaurants {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Restaurant>> {
        Ok(self.0.lock().unwrap().get(id).cloned())
    }

    async fn find_all_active(&self) -> AppResult<Vec<Restaurant>> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.is_active)
            .cloned()
            .collect())
    }

    async fn insert(&self, restaurant: &Restaurant) -> AppResult<()> {
        self.0
            .lock()
            .unwrap()
            .insert(restaurant.id.clone(), restaurant.clone());
        Ok(())
    }
}

#[derive(Default)]
struct MemSettings(Mutex<HashMap<String, Settings>>);

#[async_trait]
impl SettingsStore for MemSettings {
    async fn find_by_restaurant(&self, restaurant_id: &str) -> AppResult<Option<Settings>> {
        Ok(self.0.lock().unwrap().get(restaurant_id).cloned())
    }

    async fn save(&self, settings: &Settings) -> AppResult<()> {
        self.0
            .lock()
            .unwrap()
            .insert(settings.restaurant_id.clone(), settings.clone());
        Ok(())
    }
}

#[derive(Default)]
struct MemReservations(Mutex<HashMap<String, Reservation>>);

#[async_trait]
impl ReservationStore for MemReservations {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Reservation>> {
        Ok(self.0.lock().unwrap().get(id).cloned())
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<Reservation>> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .values()
            .find(|r| r.cancellation_token == token)
            .cloned())
    }

    async fn find_by_restaurant_and_date(
        &self,
        restaurant_id: &str,
        date: NaiveDate,
    ) -> AppResult<Vec<Reservation>> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.restaurant_id == restaurant_id && r.date == date)
            .cloned()
            .collect())
    }

    async fn save(&self, reservation: &Reservation) -> AppResult<()> {
        self.0
            .lock()
            .unwrap()
            .insert(reservation.id.clone(), reservation.clone());
        Ok(())
    }
}

#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<(String, String, String)>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string(), body.to_string()));
        Ok(())
    }
}

impl RecordingMailer {
    fn recipients(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|m| m.0.clone()).collect()
    }
}

/// Let fire-and-forget notification tasks run to completion on the
/// current-thread test runtime.
async fn settle() {
    for _ in 0..32 {
        tokio::task::yield_now().await;
    }
}

// ----------------------------------------------------------------- setup

struct Fixture {
    service: ReservationService,
    restaurants: Arc<MemRestaurants>,
    reservations: Arc<MemReservations>,
    mailer: Arc<RecordingMailer>,
    restaurant_id: String,
}

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// A date comfortably past the advance-time window.
fn upcoming_date() -> NaiveDate {
    (Utc::now().with_timezone(&TZ) + Duration::days(2)).date_naive()
}

fn all_week(shifts: Vec<Shift>) -> OpeningHours {
    OpeningHours {
        monday: shifts.clone(),
        tuesday: shifts.clone(),
        wednesday: shifts.clone(),
        thursday: shifts.clone(),
        friday: shifts.clone(),
        saturday: shifts.clone(),
        sunday: shifts,
    }
}

async fn fixture(mode: AcceptanceMode, capacity: u32) -> Fixture {
    let restaurants = Arc::new(MemRestaurants::default());
    let settings = Arc::new(MemSettings::default());
    let reservations = Arc::new(MemReservations::default());
    let mailer = Arc::new(RecordingMailer::default());

    let restaurant = Restaurant::create(
        &shared::models::RestaurantCreate {
            name: "La Terraza".into(),
            address: "Calle Mayor 1, Madrid".into(),
            email: "reservas@laterraza.example".into(),
            phone: "+34910000000".into(),
        },
        "admin-1",
    );
    let restaurant_id = restaurant.id.clone();
    restaurants.insert(&restaurant).await.unwrap();

    let cfg = Settings::create_from(
        &restaurant_id,
        SettingsUpdate {
            opening_hours: Some(all_week(vec![Shift {
                open: t(12, 0),
                close: t(23, 0),
                capacity,
            }])),
            time_slot_interval: Some(TimeSlotInterval::Min30),
            deposit_amount: Some(0.0),
            acceptance_mode: Some(mode),
        },
    )
    .unwrap();
    settings.save(&cfg).await.unwrap();

    let service = ReservationService::new(
        restaurants.clone(),
        settings.clone(),
        reservations.clone(),
        Notifier::new(mailer.clone()),
        TZ,
    );

    Fixture {
        service,
        restaurants,
        reservations,
        mailer,
        restaurant_id,
    }
}

fn request(restaurant_id: &str, time: NaiveTime, people: u32) -> ReservationCreate {
    ReservationCreate {
        restaurant_id: restaurant_id.to_string(),
        date: upcoming_date(),
        time,
        number_of_people: people,
        customer_name: "Ana".into(),
        customer_last_name: "García".into(),
        customer_email: "ana@example.com".into(),
        customer_phone: "+34600000000".into(),
        notes: None,
    }
}

// ----------------------------------------------------------------- tests

#[tokio::test]
async fn test_auto_mode_confirms_immediately() {
    let fx = fixture(AcceptanceMode::Auto, 20).await;

    let (reservation, message) = fx
        .service
        .create(request(&fx.restaurant_id, t(13, 0), 4))
        .await
        .unwrap();

    assert_eq!(reservation.status, ReservationStatus::Confirmed);
    assert_eq!(message, MSG_CONFIRMED);

    settle().await;
    let sent = fx.mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 2);

    let to_customer = sent.iter().find(|m| m.0 == "ana@example.com").unwrap();
    assert!(to_customer.1.contains("confirmed"));
    assert!(to_customer.2.contains(&reservation.cancellation_token));

    let to_restaurant = sent
        .iter()
        .find(|m| m.0 == "reservas@laterraza.example")
        .unwrap();
    assert!(to_restaurant.2.contains("Confirmed automatically"));
}

#[tokio::test]
async fn test_manual_mode_parks_as_pending_and_alerts_restaurant() {
    let fx = fixture(AcceptanceMode::Manual, 20).await;

    let (reservation, message) = fx
        .service
        .create(request(&fx.restaurant_id, t(13, 0), 4))
        .await
        .unwrap();

    assert_eq!(reservation.status, ReservationStatus::Pending);
    assert_eq!(message, MSG_RECEIVED);

    settle().await;
    let mut recipients = fx.mailer.recipients();
    recipients.sort();
    assert_eq!(
        recipients,
        vec!["ana@example.com", "reservas@laterraza.example"]
    );
    assert!(
        fx.mailer
            .sent
            .lock()
            .unwrap()
            .iter()
            .any(|m| m.2.contains("Awaiting your confirmation"))
    );
}

#[tokio::test]
async fn test_unknown_restaurant_is_not_found() {
    let fx = fixture(AcceptanceMode::Auto, 20).await;
    let err = fx
        .service
        .create(request("missing", t(13, 0), 2))
        .await
        .unwrap_err();
    assert!(matches!(err, shared::AppError::NotFound(_)));
}

#[tokio::test]
async fn test_inactive_restaurant_refuses_bookings() {
    let fx = fixture(AcceptanceMode::Auto, 20).await;

    let mut restaurant = fx
        .restaurants
        .find_by_id(&fx.restaurant_id)
        .await
        .unwrap()
        .unwrap();
    restaurant.is_active = false;
    fx.restaurants.insert(&restaurant).await.unwrap();

    let err = fx
        .service
        .create(request(&fx.restaurant_id, t(13, 0), 2))
        .await
        .unwrap_err();
    assert!(matches!(err, shared::AppError::Validation(_)));
    assert_eq!(err.message(), "This restaurant is not accepting reservations");
}

#[tokio::test]
async fn test_unconfigured_restaurant_refuses_bookings() {
    let fx = fixture(AcceptanceMode::Auto, 20).await;

    // Second restaurant with no settings row
    let bare = Restaurant::create(
        &shared::models::RestaurantCreate {
            name: "Sin Carta".into(),
            address: "Calle Luna 2, Madrid".into(),
            email: "hola@sincarta.example".into(),
            phone: "+34910000001".into(),
        },
        "admin-2",
    );
    fx.restaurants.insert(&bare).await.unwrap();

    let err = fx
        .service
        .create(request(&bare.id, t(13, 0), 2))
        .await
        .unwrap_err();
    assert!(matches!(err, shared::AppError::NotFound(_)));
    assert!(err.message().starts_with("Settings for restaurant"));
}

#[tokio::test]
async fn test_capacity_accumulates_across_requests() {
    let fx = fixture(AcceptanceMode::Auto, 20).await;

    fx.service
        .create(request(&fx.restaurant_id, t(13, 0), 9))
        .await
        .unwrap();
    fx.service
        .create(request(&fx.restaurant_id, t(13, 30), 9))
        .await
        .unwrap();

    // 18 of 20 seats taken
    let err = fx
        .service
        .create(request(&fx.restaurant_id, t(14, 0), 3))
        .await
        .unwrap_err();
    assert_eq!(
        err.message(),
        "No capacity available for this shift. Available: 2 people"
    );

    fx.service
        .create(request(&fx.restaurant_id, t(14, 0), 2))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_cancellation_releases_capacity() {
    let fx = fixture(AcceptanceMode::Auto, 18).await;

    let (first, _) = fx
        .service
        .create(request(&fx.restaurant_id, t(13, 0), 9))
        .await
        .unwrap();
    fx.service
        .create(request(&fx.restaurant_id, t(13, 30), 9))
        .await
        .unwrap();

    assert!(
        fx.service
            .create(request(&fx.restaurant_id, t(14, 0), 9))
            .await
            .is_err()
    );

    fx.service
        .cancel_by_token(&first.cancellation_token)
        .await
        .unwrap();

    fx.service
        .create(request(&fx.restaurant_id, t(14, 0), 9))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_cancel_by_token_happy_path_and_reuse() {
    let fx = fixture(AcceptanceMode::Auto, 20).await;

    let (reservation, _) = fx
        .service
        .create(request(&fx.restaurant_id, t(13, 0), 4))
        .await
        .unwrap();

    let (cancelled, message) = fx
        .service
        .cancel_by_token(&reservation.cancellation_token)
        .await
        .unwrap();
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);
    assert_eq!(message, MSG_CANCELLED);

    settle().await;
    assert!(
        fx.mailer
            .sent
            .lock()
            .unwrap()
            .iter()
            .any(|m| m.1.contains("cancelada"))
    );

    // The token is spent: a second use behaves like any illegal transition
    let err = fx
        .service
        .cancel_by_token(&reservation.cancellation_token)
        .await
        .unwrap_err();
    assert_eq!(
        err.message(),
        "Only pending or confirmed reservations can be cancelled"
    );
}

#[tokio::test]
async fn test_cancel_with_unknown_token() {
    let fx = fixture(AcceptanceMode::Auto, 20).await;
    let err = fx.service.cancel_by_token("no-such-token").await.unwrap_err();
    assert!(matches!(err, shared::AppError::NotFound(_)));
    assert_eq!(err.message(), "Reservation not found or token is invalid");
}

#[tokio::test]
async fn test_accept_pending_reservation() {
    let fx = fixture(AcceptanceMode::Manual, 20).await;

    let (reservation, _) = fx
        .service
        .create(request(&fx.restaurant_id, t(13, 0), 4))
        .await
        .unwrap();
    settle().await;

    let accepted = fx.service.accept(&reservation.id).await.unwrap();
    assert_eq!(accepted.status, ReservationStatus::Confirmed);

    // Accepting twice is an illegal transition
    let err = fx.service.accept(&reservation.id).await.unwrap_err();
    assert_eq!(err.message(), "Only pending reservations can be accepted");
}

#[tokio::test]
async fn test_reject_forwards_reason_to_customer() {
    let fx = fixture(AcceptanceMode::Manual, 20).await;

    let (reservation, _) = fx
        .service
        .create(request(&fx.restaurant_id, t(13, 0), 4))
        .await
        .unwrap();
    settle().await;
    fx.mailer.sent.lock().unwrap().clear();

    let rejected = fx
        .service
        .reject(&reservation.id, Some("Private event that evening".into()))
        .await
        .unwrap();
    assert_eq!(rejected.status, ReservationStatus::Rejected);

    settle().await;
    let sent = fx.mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "ana@example.com");
    assert!(sent[0].2.contains("Private event that evening"));
}

#[tokio::test]
async fn test_list_for_day_includes_every_status() {
    let fx = fixture(AcceptanceMode::Auto, 40).await;

    let (kept, _) = fx
        .service
        .create(request(&fx.restaurant_id, t(13, 0), 4))
        .await
        .unwrap();
    let (gone, _) = fx
        .service
        .create(request(&fx.restaurant_id, t(13, 30), 4))
        .await
        .unwrap();
    fx.service
        .cancel_by_token(&gone.cancellation_token)
        .await
        .unwrap();

    let day = fx
        .service
        .list_for_day(&fx.restaurant_id, upcoming_date())
        .await
        .unwrap();
    assert_eq!(day.len(), 2);
    assert!(day.iter().any(|r| r.id == kept.id));
    assert!(
        day.iter()
            .any(|r| r.id == gone.id && r.status == ReservationStatus::Cancelled)
    );

    let err = fx
        .service
        .list_for_day("missing", upcoming_date())
        .await
        .unwrap_err();
    assert!(matches!(err, shared::AppError::NotFound(_)));

    // Double-check nothing leaked into another restaurant's book
    assert_eq!(fx.reservations.0.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_payload_validation_rejects_blank_and_malformed_fields() {
    let fx = fixture(AcceptanceMode::Auto, 20).await;

    let mut bad = request(&fx.restaurant_id, t(13, 0), 4);
    bad.customer_name = "  ".into();
    assert!(fx.service.create(bad).await.is_err());

    let mut bad = request(&fx.restaurant_id, t(13, 0), 4);
    bad.customer_email = "not-an-email".into();
    assert!(fx.service.create(bad).await.is_err());

    let bad = request(&fx.restaurant_id, t(13, 0), 0);
    assert!(fx.service.create(bad).await.is_err());

    // A refused request leaves no trace: nothing stored, nobody emailed
    settle().await;
    assert!(fx.reservations.0.lock().unwrap().is_empty());
    assert!(fx.mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_admission_persists_nothing_and_sends_nothing() {
    let fx = fixture(AcceptanceMode::Auto, 20).await;

    let err = fx
        .service
        .create(request(&fx.restaurant_id, t(13, 0), 10))
        .await
        .unwrap_err();
    assert_eq!(
        err.message(),
        "For groups of 10 or more please contact the restaurant directly"
    );

    settle().await;
    assert!(fx.reservations.0.lock().unwrap().is_empty());
    assert!(fx.mailer.sent.lock().unwrap().is_empty());
}
