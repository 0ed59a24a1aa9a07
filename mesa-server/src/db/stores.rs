//! SQLite-backed implementations of the persistence seams.

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::models::{Reservation, Restaurant, Settings, User};
use shared::{AppError, AppResult};
use sqlx::SqlitePool;

use super::ports::{ReservationStore, RestaurantStore, SettingsStore, UserStore};
use super::repository;

/// Translate a database failure, keeping unique-constraint hits
/// distinguishable so callers can surface them as conflicts.
fn map_db_err(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db) = &e
        && db.is_unique_violation()
    {
        return AppError::conflict("Resource already exists");
    }
    AppError::database(e.to_string())
}

#[derive(Clone)]
pub struct SqliteRestaurantStore {
    pool: SqlitePool,
}

impl SqliteRestaurantStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RestaurantStore for SqliteRestaurantStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Restaurant>> {
        repository::restaurant::find_by_id(&self.pool, id)
            .await
            .map_err(map_db_err)
    }

    async fn find_all_active(&self) -> AppResult<Vec<Restaurant>> {
        repository::restaurant::find_all_active(&self.pool)
            .await
            .map_err(map_db_err)
    }

    async fn insert(&self, restaurant: &Restaurant) -> AppResult<()> {
        repository::restaurant::insert(&self.pool, restaurant)
            .await
            .map_err(map_db_err)
    }
}

#[derive(Clone)]
pub struct SqliteSettingsStore {
    pool: SqlitePool,
}

impl SqliteSettingsStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsStore for SqliteSettingsStore {
    async fn find_by_restaurant(&self, restaurant_id: &str) -> AppResult<Option<Settings>> {
        repository::settings::find_by_restaurant(&self.pool, restaurant_id)
            .await
            .map_err(map_db_err)
    }

    async fn save(&self, settings: &Settings) -> AppResult<()> {
        repository::settings::upsert(&self.pool, settings)
            .await
            .map_err(map_db_err)
    }
}

#[derive(Clone)]
pub struct SqliteReservationStore {
    pool: SqlitePool,
}

impl SqliteReservationStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationStore for SqliteReservationStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Reservation>> {
        repository::reservation::find_by_id(&self.pool, id)
            .await
            .map_err(map_db_err)
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<Reservation>> {
        repository::reservation::find_by_token(&self.pool, token)
            .await
            .map_err(map_db_err)
    }

    async fn find_by_restaurant_and_date(
        &self,
        restaurant_id: &str,
        date: NaiveDate,
    ) -> AppResult<Vec<Reservation>> {
        repository::reservation::find_by_restaurant_and_date(&self.pool, restaurant_id, date)
            .await
            .map_err(map_db_err)
    }

    async fn save(&self, reservation: &Reservation) -> AppResult<()> {
        repository::reservation::save(&self.pool, reservation)
            .await
            .map_err(map_db_err)
    }
}

#[derive(Clone)]
pub struct SqliteUserStore {
    pool: SqlitePool,
}

impl SqliteUserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        repository::user::find_by_email(&self.pool, email)
            .await
            .map_err(map_db_err)
    }

    async fn insert(&self, user: &User) -> AppResult<()> {
        repository::user::insert(&self.pool, user)
            .await
            .map_err(map_db_err)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        repository::user::delete(&self.pool, id)
            .await
            .map_err(map_db_err)
    }
}
