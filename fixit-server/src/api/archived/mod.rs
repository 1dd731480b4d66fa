//! Archived Jobs API Module
//!
//! Admin view over soft-deleted jobs: paged listing and restore.

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

/// Archived jobs router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/archived", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_archived))
        .route("/{id}/restore", patch(handler::restore_job))
}
