//! Restaurant Model

use serde::{Deserialize, Serialize};

/// Restaurant entity
///
/// Read-only from the admission engine's perspective apart from the
/// `is_active` gate; inactive restaurants accept no reservations and are
/// hidden from the public listing.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    /// Owning admin user, set by the onboarding flow
    pub admin_id: Option<String>,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create restaurant payload (onboarding)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantCreate {
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
}

impl Restaurant {
    pub fn create(input: &RestaurantCreate, admin_id: &str) -> Self {
        let now = crate::util::now_millis();
        Self {
            id: crate::util::new_id(),
            name: input.name.clone(),
            admin_id: Some(admin_id.to_string()),
            address: input.address.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
