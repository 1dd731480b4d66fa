//! Job Repository
//!
//! Paged listing over a LEFT-JOINed view (client / category / hired
//! worker) plus the soft-delete state machine. State transitions use a
//! conditional UPDATE on the current flag; zero rows affected means the
//! record was not in the expected state.

use shared::models::{Job, JobState, JobStatus};
use shared::util::now_millis;
use sqlx::SqlitePool;

use super::RepoResult;
use crate::listing::{JobFilter, ListQuery};

/// 列表查询返回的联表行。client 列可能整组为 NULL (LEFT JOIN 未命中)，
/// 投影阶段负责丢弃这类行。
#[derive(Debug, sqlx::FromRow)]
pub struct JobJoinRow {
    pub id: String,
    pub description: String,
    pub price: f64,
    pub location: String,
    pub status: JobStatus,
    pub is_deleted: bool,
    pub created_at: i64,
    pub updated_at: i64,

    pub category_id: Option<String>,
    pub category_name: Option<String>,

    pub client_row_id: Option<String>,
    pub client_first_name: Option<String>,
    pub client_last_name: Option<String>,
    pub client_email: Option<String>,
    pub client_profile_picture_url: Option<String>,

    pub worker_row_id: Option<String>,
    pub worker_first_name: Option<String>,
    pub worker_last_name: Option<String>,
}

const JOIN_SELECT: &str = "SELECT \
    j.id, j.description, j.price, j.location, j.status, j.is_deleted, \
    j.created_at, j.updated_at, \
    j.category_id, cat.name AS category_name, \
    c.id AS client_row_id, c.first_name AS client_first_name, \
    c.last_name AS client_last_name, c.email AS client_email, \
    c.profile_picture_url AS client_profile_picture_url, \
    w.id AS worker_row_id, w.first_name AS worker_first_name, \
    w.last_name AS worker_last_name \
    FROM job j \
    LEFT JOIN client c ON c.id = j.client_id \
    LEFT JOIN category cat ON cat.id = j.category_id \
    LEFT JOIN worker w ON w.id = j.hired_worker_id";

#[derive(Clone)]
pub struct JobRepository {
    pool: SqlitePool,
}

impl JobRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetch one page of joined rows matching the compiled filter.
    /// Ordering column and direction come from enums, never user text.
    pub async fn list_page(
        &self,
        filter: &JobFilter,
        query: &ListQuery,
    ) -> RepoResult<Vec<JobJoinRow>> {
        let sql = format!(
            "{JOIN_SELECT} WHERE {} ORDER BY {} {} LIMIT ? OFFSET ?",
            filter.where_sql,
            query.sort_by.column(),
            query.order.sql(),
        );

        let mut q = sqlx::query_as::<_, JobJoinRow>(&sql);
        for bind in &filter.binds {
            q = q.bind(bind);
        }
        let rows = q
            .bind(query.limit)
            .bind(query.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Count all rows matching the filter (pre-projection count)
    pub async fn count(&self, filter: &JobFilter) -> RepoResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM job j WHERE {}", filter.where_sql);
        let mut q = sqlx::query_scalar::<_, i64>(&sql);
        for bind in &filter.binds {
            q = q.bind(bind);
        }
        Ok(q.fetch_one(&self.pool).await?)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Job>> {
        let job = sqlx::query_as::<_, Job>("SELECT * FROM job WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }

    /// Transition the soft-delete flag `from → to`.
    ///
    /// Returns `None` when no row with that id is currently in the `from`
    /// state — the caller maps that to JOB_NOT_FOUND. Archiving an
    /// archived job and restoring an active one both fall out of this
    /// guard naturally.
    pub async fn set_state(
        &self,
        id: &str,
        from: JobState,
        to: JobState,
    ) -> RepoResult<Option<Job>> {
        let result = sqlx::query(
            "UPDATE job SET is_deleted = ?, updated_at = ? WHERE id = ? AND is_deleted = ?",
        )
        .bind(to.is_deleted())
        .bind(now_millis())
        .bind(id)
        .bind(from.is_deleted())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    /// Insert a job row (admin tooling and tests)
    pub async fn create(&self, job: &Job) -> RepoResult<()> {
        sqlx::query(
            "INSERT INTO job (id, client_id, category_id, hired_worker_id, description, \
             price, location, status, is_deleted, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&job.id)
        .bind(&job.client_id)
        .bind(&job.category_id)
        .bind(&job.hired_worker_id)
        .bind(&job.description)
        .bind(job.price)
        .bind(&job.location)
        .bind(job.status.as_str())
        .bind(job.is_deleted)
        .bind(job.created_at)
        .bind(job.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
