//! Reservation API module

mod handler;

use axum::{
    Router,
    routing::{delete, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reservations", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/cancel/{token}", delete(handler::cancel))
        .route("/{id}/accept", post(handler::accept))
        .route("/{id}/reject", post(handler::reject))
}
