//! ID Verification API Handlers

use std::collections::BTreeMap;
use std::time::Instant;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use shared::models::{VerificationApprove, VerificationReject};
use shared::util::{is_object_id, millis_to_iso};

use crate::core::ServerState;
use crate::db::repository::ProfileRole;
use crate::db::repository::verification::PendingRow;
use crate::listing::{ListQuery, Pagination, RawListQuery};
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};
use crate::utils::{ApiResponse, AppError, AppResult};

/// 待审核队列查询参数 (分页 + 可选的角色过滤)
#[derive(Debug, Default, Deserialize)]
pub struct PendingQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingVerificationDto {
    pub id: String,
    pub role: String,
    pub full_name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<String>,
    pub resubmission_count: i64,
    pub max_resubmission_attempts: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingData {
    pub verifications: Vec<PendingVerificationDto>,
    pub pagination: Pagination,
}

/// GET /api/verification/pending
///
/// 跨 client / worker 两张表的待审核队列，最早提交的在前。
pub async fn list_pending(
    State(state): State<ServerState>,
    Query(raw): Query<PendingQuery>,
) -> AppResult<Json<ApiResponse<PendingData>>> {
    let started = Instant::now();

    // 复用列表查询的 page/limit 规则
    let query = ListQuery::normalize(RawListQuery {
        page: raw.page,
        limit: raw.limit,
        ..Default::default()
    })?;
    let role = match raw.role.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) => Some(ProfileRole::parse(s).ok_or_else(|| {
            AppError::validation("role", "role must be 'client' or 'worker'")
        })?),
    };

    let repo = state.verifications();
    let total = repo.count_pending(role).await.map_err(AppError::from)?;
    if total == 0 {
        let body = ApiResponse::ok(
            "NO_PENDING_VERIFICATIONS",
            "No pending verifications",
            PendingData {
                verifications: Vec::new(),
                pagination: Pagination::empty(query.page, query.limit),
            },
        )
        .with_meta(started);
        return Ok(Json(body));
    }

    let rows = repo
        .list_pending(role, query.limit, query.offset())
        .await
        .map_err(AppError::from)?;
    let verifications = rows
        .into_iter()
        .map(|row| project_pending(row, &state))
        .collect::<AppResult<Vec<_>>>()?;

    let body = ApiResponse::ok(
        "PENDING_VERIFICATIONS_RETRIEVED",
        "Pending verifications retrieved successfully",
        PendingData {
            verifications,
            pagination: Pagination::compute(total, query.page, query.limit),
        },
    )
    .with_meta(started);
    Ok(Json(body))
}

/// client 的姓名列是密文，worker 的是明文
fn project_pending(row: PendingRow, state: &ServerState) -> AppResult<PendingVerificationDto> {
    let (first, last) = if row.role == "client" {
        let first = state.cipher.decrypt(&row.first_name).map_err(|e| {
            AppError::internal(format!("client name decryption failed: {e}"))
        })?;
        let last = state.cipher.decrypt(&row.last_name).map_err(|e| {
            AppError::internal(format!("client name decryption failed: {e}"))
        })?;
        (first, last)
    } else {
        (row.first_name, row.last_name)
    };

    Ok(PendingVerificationDto {
        id: row.id,
        role: row.role,
        full_name: format!("{first} {last}"),
        status: row.verification_status.as_str().to_string(),
        submitted_at: row.verification_submitted_at.map(millis_to_iso),
        resubmission_count: row.resubmission_count,
        max_resubmission_attempts: row.max_resubmission_attempts,
    })
}

fn parse_review_target(role: &str, id: &str) -> AppResult<ProfileRole> {
    let role = ProfileRole::parse(role)
        .ok_or_else(|| AppError::validation("role", "role must be 'client' or 'worker'"))?;
    if !is_object_id(id) {
        return Err(AppError::invalid_id("Invalid profile ID format"));
    }
    Ok(role)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewData {
    pub id: String,
    pub role: String,
    pub status: String,
}

/// PATCH /api/verification/{role}/{id}/approve
pub async fn approve(
    State(state): State<ServerState>,
    Path((role, id)): Path<(String, String)>,
    Json(payload): Json<VerificationApprove>,
) -> AppResult<Json<ApiResponse<ReviewData>>> {
    let started = Instant::now();

    let role = parse_review_target(&role, &id)?;
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;
    let notes = payload.notes.unwrap_or_default();

    let updated = state
        .verifications()
        .approve(role, &id, &notes)
        .await
        .map_err(AppError::from)?;
    if !updated {
        return Err(AppError::not_found(
            "USER_NOT_FOUND",
            "No reviewable verification for that profile",
        ));
    }

    let body = ApiResponse::ok(
        "VERIFICATION_APPROVED",
        "Verification approved successfully",
        ReviewData {
            id,
            role: role.as_str().to_string(),
            status: "approved".to_string(),
        },
    )
    .with_meta(started);
    Ok(Json(body))
}

/// PATCH /api/verification/{role}/{id}/reject
///
/// 默认允许重新提交；重提交次数用尽时返回 409
/// RESUBMISSION_LIMIT_REACHED，档案保持不变。
pub async fn reject(
    State(state): State<ServerState>,
    Path((role, id)): Path<(String, String)>,
    Json(payload): Json<VerificationReject>,
) -> AppResult<Json<ApiResponse<ReviewData>>> {
    let started = Instant::now();

    let role = parse_review_target(&role, &id)?;
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;
    let notes = payload.notes.unwrap_or_default();
    let require_resubmission = payload.require_resubmission.unwrap_or(true);

    let repo = state.verifications();
    let (updated, status) = if require_resubmission {
        let updated = repo
            .reject_resubmission(role, &id, &notes)
            .await
            .map_err(AppError::from)?;
        (updated, "requires_resubmission")
    } else {
        let updated = repo
            .reject_final(role, &id, &notes)
            .await
            .map_err(AppError::from)?;
        (updated, "rejected")
    };

    if !updated {
        // 区分次数用尽与不可审核/不存在
        if require_resubmission
            && let Some(snapshot) = repo.snapshot(role, &id).await.map_err(AppError::from)?
            && snapshot.verification_status.is_reviewable()
            && snapshot.at_resubmission_cap()
        {
            return Err(AppError::conflict(
                "RESUBMISSION_LIMIT_REACHED",
                "Resubmission limit reached for this profile",
            ));
        }
        return Err(AppError::not_found(
            "USER_NOT_FOUND",
            "No reviewable verification for that profile",
        ));
    }

    let body = ApiResponse::ok(
        "VERIFICATION_REJECTED",
        "Verification rejected",
        ReviewData {
            id,
            role: role.as_str().to_string(),
            status: status.to_string(),
        },
    )
    .with_meta(started);
    Ok(Json(body))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsData {
    pub counts: BTreeMap<String, i64>,
    pub total: i64,
    pub total_pending: i64,
    pub approval_rate: f64,
}

/// GET /api/verification/statistics
pub async fn statistics(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<StatisticsData>>> {
    let started = Instant::now();

    let repo = state.verifications();
    let counts: BTreeMap<String, i64> = repo
        .status_counts()
        .await
        .map_err(AppError::from)?
        .into_iter()
        .collect();
    let total_pending = repo.count_pending(None).await.map_err(AppError::from)?;

    let total: i64 = counts.values().sum();
    let approved = counts.get("approved").copied().unwrap_or(0);
    let approval_rate = if total > 0 {
        approved as f64 / total as f64
    } else {
        0.0
    };

    let body = ApiResponse::ok(
        "VERIFICATION_STATISTICS_RETRIEVED",
        "Verification statistics retrieved successfully",
        StatisticsData {
            counts,
            total,
            total_pending,
            approval_rate,
        },
    )
    .with_meta(started);
    Ok(Json(body))
}
