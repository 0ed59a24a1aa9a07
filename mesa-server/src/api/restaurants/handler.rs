//! Restaurant API Handlers
//!
//! Listing and detail are public (the booking widget needs them); the
//! day sheet is for the restaurant's own dashboard.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::{AppResponse, ok};
use shared::models::{Reservation, Restaurant};
use shared::{AppError, AppResult};

use crate::core::ServerState;
use crate::utils::time;

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    /// YYYY-MM-DD
    pub date: String,
}

/// GET /api/restaurants - active restaurants only
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<Restaurant>>>> {
    let restaurants = state.restaurants.find_all_active().await?;
    Ok(ok(restaurants))
}

/// GET /api/restaurants/:id - public detail, inactive ones stay hidden
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Restaurant>>> {
    let restaurant = state
        .restaurants
        .find_by_id(&id)
        .await?
        .filter(|r| r.is_active)
        .ok_or_else(|| AppError::not_found("Restaurant not found"))?;
    Ok(ok(restaurant))
}

/// GET /api/restaurants/:id/reservations?date=YYYY-MM-DD - day sheet
pub async fn day_reservations(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<DayQuery>,
) -> AppResult<Json<AppResponse<Vec<Reservation>>>> {
    let date = time::parse_date(&query.date)?;
    let reservations = state.reservations.list_for_day(&id, date).await?;
    Ok(ok(reservations))
}
