//! Client Management API Handlers
//!
//! Block / unblock use the same state-transition guard as
//! archive / restore: the UPDATE only matches a client currently in
//! the opposite state, and a miss is reported as CLIENT_NOT_FOUND.

use std::time::Instant;

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use shared::util::is_object_id;

use crate::core::ServerState;
use crate::security_log;
use crate::utils::{ApiResponse, AppError, AppResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationData {
    pub client_id: String,
    pub email: String,
    pub blocked: bool,
}

/// PATCH /api/clients/{id}/block
pub async fn block_client(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<ModerationData>>> {
    set_blocked(state, id, true).await
}

/// PATCH /api/clients/{id}/unblock
pub async fn unblock_client(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<ModerationData>>> {
    set_blocked(state, id, false).await
}

async fn set_blocked(
    state: ServerState,
    id: String,
    blocked: bool,
) -> AppResult<Json<ApiResponse<ModerationData>>> {
    let started = Instant::now();

    if !is_object_id(&id) {
        return Err(AppError::invalid_id("Invalid client ID format"));
    }

    let client = state
        .clients()
        .set_blocked(&id, blocked)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("CLIENT_NOT_FOUND", "Client not found"))?;

    let (code, message) = if blocked {
        ("CLIENT_BLOCKED", "Client blocked successfully")
    } else {
        ("CLIENT_UNBLOCKED", "Client unblocked successfully")
    };
    security_log!(
        "INFO",
        "client_moderation",
        client_id = client.id,
        blocked = blocked
    );

    let body = ApiResponse::ok(
        code,
        message,
        ModerationData {
            client_id: client.id,
            email: client.email,
            blocked: client.blocked,
        },
    )
    .with_meta(started);
    Ok(Json(body))
}
