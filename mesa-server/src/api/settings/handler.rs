//! Settings API Handlers
//!
//! A restaurant's settings row is created lazily: the first PUT must
//! carry every field, later PUTs are partial patches.

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::{AppResponse, ok};
use shared::models::{Settings, SettingsUpdate};
use shared::{AppError, AppResult};

use crate::core::ServerState;

/// GET /api/restaurants/:id/settings
pub async fn get_settings(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Settings>>> {
    ensure_restaurant(&state, &id).await?;
    let settings = state
        .settings
        .find_by_restaurant(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Settings not configured for this restaurant"))?;
    Ok(ok(settings))
}

/// PUT /api/restaurants/:id/settings - create-or-patch
pub async fn update_settings(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<SettingsUpdate>,
) -> AppResult<Json<AppResponse<Settings>>> {
    payload.validate()?;
    ensure_restaurant(&state, &id).await?;

    let settings = match state.settings.find_by_restaurant(&id).await? {
        Some(mut existing) => {
            existing.apply(payload);
            existing
        }
        None => Settings::create_from(&id, payload)?,
    };
    state.settings.save(&settings).await?;

    tracing::info!(restaurant_id = %id, "Settings updated");
    Ok(ok(settings))
}

async fn ensure_restaurant(state: &ServerState, id: &str) -> AppResult<()> {
    if state.restaurants.find_by_id(id).await?.is_none() {
        return Err(AppError::not_found("Restaurant not found"));
    }
    Ok(())
}
