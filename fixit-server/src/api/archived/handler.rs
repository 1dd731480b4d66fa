//! Archived Jobs API Handlers

use std::time::Instant;

use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use shared::models::JobState;
use shared::util::{is_object_id, now_millis};

use crate::core::ServerState;
use crate::listing::{
    AppliedFilters, DeletedView, JobDto, JobFilter, ListQuery, Pagination, RawListQuery,
    project_jobs,
};
use crate::utils::{ApiResponse, AppError, AppResult};

/// 列表响应的 data 部分
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchivedJobsData {
    pub jobs: Vec<JobDto>,
    pub pagination: Pagination,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<AppliedFilters>,
}

/// GET /api/archived
///
/// 归档任务分页列表。`is_deleted = 1` 由端点强制，查询参数只能
/// 进一步收窄。空结果返回 200 和 NO_ARCHIVED_JOBS_FOUND，不是 404。
pub async fn list_archived(
    State(state): State<ServerState>,
    Query(raw): Query<RawListQuery>,
) -> AppResult<Response> {
    let started = Instant::now();

    let query = ListQuery::normalize(raw)?;
    let filter = JobFilter::compile(&query, DeletedView::ArchivedOnly);
    let repo = state.jobs();

    // totalItems 是投影前的行数；缺失 client 的行仍计入 (历史行为)
    let total = repo.count(&filter).await.map_err(AppError::from)?;

    if total == 0 {
        let body = ApiResponse::ok(
            "NO_ARCHIVED_JOBS_FOUND",
            "No archived jobs found",
            ArchivedJobsData {
                jobs: Vec::new(),
                pagination: Pagination::empty(query.page, query.limit),
                filters: None,
            },
        )
        .with_meta(started);
        return Ok(Json(body).into_response());
    }

    let rows = repo.list_page(&filter, &query).await.map_err(AppError::from)?;
    let jobs = project_jobs(rows, &state.cipher)?;
    let pagination = Pagination::compute(total, query.page, query.limit);

    let body = ApiResponse::ok(
        "ARCHIVED_JOBS_RETRIEVED",
        "Archived jobs retrieved successfully",
        ArchivedJobsData {
            jobs,
            pagination,
            filters: Some(query.applied_filters()),
        },
    )
    .with_meta(started);

    let headers = [
        (
            http::header::CACHE_CONTROL,
            http::HeaderValue::from_static("public, max-age=300"),
        ),
        (
            http::header::ETAG,
            http::HeaderValue::from_str(&format!("\"archived-jobs-{}\"", now_millis()))
                .map_err(|e| AppError::internal(format!("Failed to build ETag: {e}")))?,
        ),
        (
            http::HeaderName::from_static("x-total-count"),
            http::HeaderValue::from_str(&total.to_string())
                .map_err(|e| AppError::internal(format!("Failed to build header: {e}")))?,
        ),
    ];

    Ok((headers, Json(body)).into_response())
}

/// restore 响应的 data 部分
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoredJobData {
    pub job_id: String,
    pub description: String,
    pub status: String,
    pub is_deleted: bool,
}

/// PATCH /api/archived/{id}/restore
///
/// 仅对当前处于归档态的任务生效。格式非法的 id 返回 INVALID_ID，
/// 不存在或已是活跃态返回 JOB_NOT_FOUND。
pub async fn restore_job(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<RestoredJobData>>> {
    let started = Instant::now();

    if !is_object_id(&id) {
        return Err(AppError::invalid_id("Invalid job ID format"));
    }

    let job = state
        .jobs()
        .set_state(&id, JobState::Archived, JobState::Active)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("JOB_NOT_FOUND", "Archived job not found"))?;

    let body = ApiResponse::ok(
        "JOB_RESTORED",
        "Job restored successfully",
        RestoredJobData {
            job_id: job.id,
            description: job.description,
            status: job.status.as_str().to_string(),
            is_deleted: job.is_deleted,
        },
    )
    .with_meta(started);
    Ok(Json(body))
}
