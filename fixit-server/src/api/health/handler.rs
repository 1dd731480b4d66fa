//! Health API Handlers

use axum::{Json, extract::State};
use serde::Serialize;
use shared::util::now_iso;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthData {
    pub status: &'static str,
    pub version: &'static str,
    pub environment: String,
    pub timestamp: String,
}

/// GET /healthz
///
/// 同时探测数据库连通性，失败返回 500。
pub async fn health(State(state): State<ServerState>) -> AppResult<Json<HealthData>> {
    sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(&state.db.pool)
        .await
        .map_err(AppError::from)?;

    Ok(Json(HealthData {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        timestamp: now_iso(),
    }))
}
