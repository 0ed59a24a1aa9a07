//! Settings API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/restaurants/{id}/settings",
        get(handler::get_settings).put(handler::update_settings),
    )
}
