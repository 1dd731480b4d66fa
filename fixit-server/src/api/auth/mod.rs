//! Auth API Module

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

/// Auth router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/auth/login", post(handler::login))
        .route("/api/auth/logout", post(handler::logout))
}
