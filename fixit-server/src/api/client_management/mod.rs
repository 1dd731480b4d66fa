//! Client Management API Module
//!
//! Admin moderation actions on client accounts.

mod handler;

use axum::{Router, routing::patch};

use crate::core::ServerState;

/// Client management router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/clients", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{id}/block", patch(handler::block_client))
        .route("/{id}/unblock", patch(handler::unblock_client))
}
