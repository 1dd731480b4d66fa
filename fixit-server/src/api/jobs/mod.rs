//! Jobs API Module
//!
//! Admin view over live jobs: paged listing and archive.

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

/// Jobs router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/jobs", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_jobs))
        .route("/{id}/archive", patch(handler::archive_job))
}
