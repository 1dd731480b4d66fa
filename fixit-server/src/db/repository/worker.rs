//! Worker Repository

use shared::models::Worker;
use sqlx::SqlitePool;

use super::RepoResult;

#[derive(Clone)]
pub struct WorkerRepository {
    pool: SqlitePool,
}

impl WorkerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Worker>> {
        let worker = sqlx::query_as::<_, Worker>("SELECT * FROM worker WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(worker)
    }

    /// Insert a worker row (admin tooling and tests)
    pub async fn create(&self, worker: &Worker) -> RepoResult<()> {
        sqlx::query(
            "INSERT INTO worker (id, credential_id, first_name, last_name, \
             profile_picture_url, status, blocked, verification_status, \
             verification_submitted_at, verification_approved_at, verification_rejected_at, \
             verification_notes, resubmission_count, max_resubmission_attempts, \
             created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&worker.id)
        .bind(&worker.credential_id)
        .bind(&worker.first_name)
        .bind(&worker.last_name)
        .bind(&worker.profile_picture_url)
        .bind(worker.status)
        .bind(worker.blocked)
        .bind(worker.verification_status.as_str())
        .bind(worker.verification_submitted_at)
        .bind(worker.verification_approved_at)
        .bind(worker.verification_rejected_at)
        .bind(&worker.verification_notes)
        .bind(worker.resubmission_count)
        .bind(worker.max_resubmission_attempts)
        .bind(worker.created_at)
        .bind(worker.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
