//! Health API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Health router (public, outside the auth gate)
pub fn router() -> Router<ServerState> {
    Router::new().route("/healthz", get(handler::health))
}
