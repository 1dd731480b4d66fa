//! Jobs API Handlers
//!
//! Same query pipeline as the archived listing, with the soft-delete
//! view forced to active rows.

use std::time::Instant;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;
use shared::models::JobState;
use shared::util::is_object_id;

use crate::core::ServerState;
use crate::listing::{
    AppliedFilters, DeletedView, JobDto, JobFilter, ListQuery, Pagination, RawListQuery,
    project_jobs,
};
use crate::utils::{ApiResponse, AppError, AppResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobsData {
    pub jobs: Vec<JobDto>,
    pub pagination: Pagination,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<AppliedFilters>,
}

/// GET /api/jobs
pub async fn list_jobs(
    State(state): State<ServerState>,
    Query(raw): Query<RawListQuery>,
) -> AppResult<Json<ApiResponse<JobsData>>> {
    let started = Instant::now();

    let query = ListQuery::normalize(raw)?;
    let filter = JobFilter::compile(&query, DeletedView::ActiveOnly);
    let repo = state.jobs();

    let total = repo.count(&filter).await.map_err(AppError::from)?;
    if total == 0 {
        let body = ApiResponse::ok(
            "NO_JOBS_FOUND",
            "No jobs found",
            JobsData {
                jobs: Vec::new(),
                pagination: Pagination::empty(query.page, query.limit),
                filters: None,
            },
        )
        .with_meta(started);
        return Ok(Json(body));
    }

    let rows = repo.list_page(&filter, &query).await.map_err(AppError::from)?;
    let jobs = project_jobs(rows, &state.cipher)?;
    let pagination = Pagination::compute(total, query.page, query.limit);

    let body = ApiResponse::ok(
        "JOBS_RETRIEVED",
        "Jobs retrieved successfully",
        JobsData {
            jobs,
            pagination,
            filters: Some(query.applied_filters()),
        },
    )
    .with_meta(started);
    Ok(Json(body))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchivedJobData {
    pub job_id: String,
    pub description: String,
    pub status: String,
    pub is_deleted: bool,
}

/// PATCH /api/jobs/{id}/archive
///
/// 仅对当前活跃的任务生效；已归档的任务返回 JOB_NOT_FOUND。
pub async fn archive_job(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<ArchivedJobData>>> {
    let started = Instant::now();

    if !is_object_id(&id) {
        return Err(AppError::invalid_id("Invalid job ID format"));
    }

    let job = state
        .jobs()
        .set_state(&id, JobState::Active, JobState::Archived)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("JOB_NOT_FOUND", "Active job not found"))?;

    let body = ApiResponse::ok(
        "JOB_ARCHIVED",
        "Job archived successfully",
        ArchivedJobData {
            job_id: job.id,
            description: job.description,
            status: job.status.as_str().to_string(),
            is_deleted: job.is_deleted,
        },
    )
    .with_meta(started);
    Ok(Json(body))
}
