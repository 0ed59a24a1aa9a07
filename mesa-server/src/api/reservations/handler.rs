//! Reservation API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use shared::error::{AppResponse, ok, ok_with_message};
use shared::models::{Reservation, ReservationCreate};
use shared::AppResult;

use crate::core::ServerState;
use crate::reservations::service::MSG_CONFIRMED;

#[derive(Debug, Deserialize)]
pub struct RejectPayload {
    pub reason: Option<String>,
}

/// POST /api/reservations - booking request intake
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ReservationCreate>,
) -> AppResult<Json<AppResponse<Reservation>>> {
    let (reservation, message) = state.reservations.create(payload).await?;
    Ok(ok_with_message(reservation, message))
}

/// DELETE /api/reservations/cancel/:token - self-service cancellation
pub async fn cancel(
    State(state): State<ServerState>,
    Path(token): Path<String>,
) -> AppResult<Json<AppResponse<Reservation>>> {
    let (reservation, message) = state.reservations.cancel_by_token(&token).await?;
    Ok(ok_with_message(reservation, message))
}

/// POST /api/reservations/:id/accept - confirm a pending reservation
pub async fn accept(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Reservation>>> {
    let reservation = state.reservations.accept(&id).await?;
    Ok(ok_with_message(reservation, MSG_CONFIRMED))
}

/// POST /api/reservations/:id/reject - decline a pending reservation
pub async fn reject(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<RejectPayload>,
) -> AppResult<Json<AppResponse<Reservation>>> {
    let reservation = state.reservations.reject(&id, payload.reason).await?;
    Ok(ok(reservation))
}
