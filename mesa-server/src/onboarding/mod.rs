//! Restaurant onboarding: creates the admin account and the restaurant
//! record in one operation and emails the admin their temporary password.
//!
//! SQLite gives no cross-store transaction here because the stores are
//! independent seams, so the user insert is compensated manually if the
//! restaurant insert fails.

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHasher};
use rand::Rng;
use serde::Deserialize;
use shared::models::{Restaurant, RestaurantCreate, User, UserRole};
use shared::{AppError, AppResult};
use std::sync::Arc;

use crate::db::ports::{RestaurantStore, UserStore};
use crate::notifications::Notifier;
use crate::utils::validation;

const TEMP_PASSWORD_LEN: usize = 12;
const TEMP_PASSWORD_ALPHABET: &[u8] =
    b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz23456789";

/// Onboarding payload: the admin's identity plus the restaurant details.
#[derive(Debug, Clone, Deserialize)]
pub struct OnboardingRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub restaurant: RestaurantCreate,
}

pub struct OnboardingService {
    users: Arc<dyn UserStore>,
    restaurants: Arc<dyn RestaurantStore>,
    notifier: Notifier,
}

impl OnboardingService {
    pub fn new(
        users: Arc<dyn UserStore>,
        restaurants: Arc<dyn RestaurantStore>,
        notifier: Notifier,
    ) -> Self {
        Self {
            users,
            restaurants,
            notifier,
        }
    }

    /// Register a restaurant together with its admin account.
    ///
    /// The account gets a generated temporary password flagged for change
    /// on first login; the password is only ever delivered by email.
    pub async fn register(&self, input: OnboardingRequest) -> AppResult<Restaurant> {
        validate_request(&input)?;

        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::conflict("An account with this email already exists"));
        }

        let temp_password = generate_temp_password();
        let password_hash = hash_password(&temp_password)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        let now = shared::util::now_millis();
        let user = User {
            id: shared::util::new_id(),
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            password_hash,
            role: UserRole::RestaurantAdmin,
            must_change_password: true,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(&user).await?;

        let restaurant = Restaurant::create(&input.restaurant, &user.id);
        if let Err(e) = self.restaurants.insert(&restaurant).await {
            // Compensate: don't leave an orphaned admin account behind
            if let Err(cleanup) = self.users.delete(&user.id).await {
                tracing::error!(
                    user_id = %user.id,
                    error = %cleanup,
                    "Failed to roll back admin account after restaurant insert failure"
                );
            }
            return Err(e);
        }

        tracing::info!(
            restaurant_id = %restaurant.id,
            admin_id = %user.id,
            "Restaurant onboarded"
        );

        self.notifier
            .admin_welcome(&user, &restaurant.name, &temp_password);

        Ok(restaurant)
    }
}

fn validate_request(input: &OnboardingRequest) -> AppResult<()> {
    validation::validate_required_text(&input.first_name, "first_name", validation::MAX_NAME_LEN)?;
    validation::validate_required_text(&input.last_name, "last_name", validation::MAX_NAME_LEN)?;
    validation::validate_email(&input.email, "email")?;
    validation::validate_required_text(&input.phone, "phone", validation::MAX_SHORT_TEXT_LEN)?;
    validation::validate_required_text(&input.restaurant.name, "restaurant.name", validation::MAX_NAME_LEN)?;
    validation::validate_required_text(
        &input.restaurant.address,
        "restaurant.address",
        validation::MAX_ADDRESS_LEN,
    )?;
    validation::validate_email(&input.restaurant.email, "restaurant.email")?;
    validation::validate_required_text(
        &input.restaurant.phone,
        "restaurant.phone",
        validation::MAX_SHORT_TEXT_LEN,
    )?;
    Ok(())
}

fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Ambiguous characters (0/O, 1/l/I) are left out of the alphabet.
fn generate_temp_password() -> String {
    let mut rng = rand::thread_rng();
    (0..TEMP_PASSWORD_LEN)
        .map(|_| TEMP_PASSWORD_ALPHABET[rng.gen_range(0..TEMP_PASSWORD_ALPHABET.len())] as char)
        .collect()
}
