//! Persistence seams consumed by the use-case services.
//!
//! The services only see these traits; SQLite-backed implementations live
//! in [`crate::db::stores`] and the unit tests supply in-memory doubles.

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::AppResult;
use shared::models::{Reservation, Restaurant, Settings, User};

#[async_trait]
pub trait RestaurantStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Restaurant>>;
    async fn find_all_active(&self) -> AppResult<Vec<Restaurant>>;
    async fn insert(&self, restaurant: &Restaurant) -> AppResult<()>;
}

#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn find_by_restaurant(&self, restaurant_id: &str) -> AppResult<Option<Settings>>;
    async fn save(&self, settings: &Settings) -> AppResult<()>;
}

#[async_trait]
pub trait ReservationStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Reservation>>;
    async fn find_by_token(&self, token: &str) -> AppResult<Option<Reservation>>;
    async fn find_by_restaurant_and_date(
        &self,
        restaurant_id: &str,
        date: NaiveDate,
    ) -> AppResult<Vec<Reservation>>;
    /// Insert-or-update by identifier.
    async fn save(&self, reservation: &Reservation) -> AppResult<()>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn insert(&self, user: &User) -> AppResult<()>;
    async fn delete(&self, id: &str) -> AppResult<()>;
}
