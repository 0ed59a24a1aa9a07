//! Onboarding API Handlers

use axum::{Json, extract::State};
use shared::AppResult;
use shared::error::{AppResponse, ok_with_message};
use shared::models::Restaurant;

use crate::core::ServerState;
use crate::onboarding::OnboardingRequest;

/// POST /api/admins - register a restaurant with its admin account
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<OnboardingRequest>,
) -> AppResult<Json<AppResponse<Restaurant>>> {
    let restaurant = state.onboarding.register(payload).await?;
    Ok(ok_with_message(
        restaurant,
        "Restaurant registered successfully",
    ))
}
