//! Shared server state
//!
//! Holds the connection pool, the store seams and the use-case services.
//! Cloned per request by axum; everything inside is `Arc`-shared.

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::core::Config;
use crate::db::DbService;
use crate::db::ports::{ReservationStore, RestaurantStore, SettingsStore, UserStore};
use crate::db::stores::{
    SqliteReservationStore, SqliteRestaurantStore, SqliteSettingsStore, SqliteUserStore,
};
use crate::notifications::resend::ResendMailer;
use crate::notifications::{Mailer, NoopMailer, Notifier};
use crate::onboarding::OnboardingService;
use crate::reservations::ReservationService;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub restaurants: Arc<dyn RestaurantStore>,
    pub settings: Arc<dyn SettingsStore>,
    pub reservations: Arc<ReservationService>,
    pub onboarding: Arc<OnboardingService>,
    /// Unix millis at process start, reported by the health endpoint
    pub started_at: i64,
}

impl ServerState {
    /// Initialize the state: work dir, database, mailer and services.
    pub async fn initialize(config: &Config) -> Result<Self, BoxError> {
        std::fs::create_dir_all(&config.work_dir)?;

        let db = DbService::new(&config.database_path()).await?;
        let pool = db.pool;

        let mailer: Arc<dyn Mailer> = match (&config.resend_api_key, config.email_enabled) {
            (Some(api_key), true) => Arc::new(ResendMailer::new(
                api_key.clone(),
                config.email_from.clone(),
            )),
            _ => {
                tracing::warn!("Email delivery disabled (no RESEND_API_KEY or EMAIL_ENABLED=false)");
                Arc::new(NoopMailer)
            }
        };
        let notifier = Notifier::new(mailer);

        let restaurants: Arc<dyn RestaurantStore> =
            Arc::new(SqliteRestaurantStore::new(pool.clone()));
        let settings: Arc<dyn SettingsStore> = Arc::new(SqliteSettingsStore::new(pool.clone()));
        let reservation_store: Arc<dyn ReservationStore> =
            Arc::new(SqliteReservationStore::new(pool.clone()));
        let users: Arc<dyn UserStore> = Arc::new(SqliteUserStore::new(pool.clone()));

        let reservations = Arc::new(ReservationService::new(
            restaurants.clone(),
            settings.clone(),
            reservation_store,
            notifier.clone(),
            config.timezone,
        ));
        let onboarding = Arc::new(OnboardingService::new(
            users,
            restaurants.clone(),
            notifier,
        ));

        Ok(Self {
            config: config.clone(),
            pool,
            restaurants,
            settings,
            reservations,
            onboarding,
            started_at: shared::util::now_millis(),
        })
    }
}
