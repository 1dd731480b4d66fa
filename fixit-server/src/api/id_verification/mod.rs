//! ID Verification API Module
//!
//! Admin review queue for client and worker identity documents.

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

/// Verification router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/verification", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/pending", get(handler::list_pending))
        .route("/statistics", get(handler::statistics))
        .route("/{role}/{id}/approve", patch(handler::approve))
        .route("/{role}/{id}/reject", patch(handler::reject))
}
