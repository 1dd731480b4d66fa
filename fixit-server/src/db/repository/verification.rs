//! ID Verification Repository
//!
//! Clients and workers share the same review flow, so the review
//! queries are written once against a role-selected table. Table names
//! come from the [`ProfileRole`] enum, never from request input.

use shared::models::VerificationStatus;
use shared::util::now_millis;
use sqlx::SqlitePool;

use super::RepoResult;

/// 待审核档案属于哪张表
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileRole {
    Client,
    Worker,
}

impl ProfileRole {
    pub fn table(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Worker => "worker",
        }
    }

    pub fn as_str(self) -> &'static str {
        self.table()
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "client" => Some(Self::Client),
            "worker" => Some(Self::Worker),
            _ => None,
        }
    }
}

/// 待审核队列中的一行 (client 与 worker 的公共投影)
///
/// client 的姓名列是密文，API 层负责解密。
#[derive(Debug, sqlx::FromRow)]
pub struct PendingRow {
    pub id: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    pub verification_status: VerificationStatus,
    pub verification_submitted_at: Option<i64>,
    pub resubmission_count: i64,
    pub max_resubmission_attempts: i64,
}

/// 档案当前的审核状态快照，用于区分 404 与重提交次数用尽
#[derive(Debug, sqlx::FromRow)]
pub struct ReviewSnapshot {
    pub verification_status: VerificationStatus,
    pub resubmission_count: i64,
    pub max_resubmission_attempts: i64,
}

impl ReviewSnapshot {
    pub fn at_resubmission_cap(&self) -> bool {
        self.resubmission_count >= self.max_resubmission_attempts
    }
}

const PENDING_STATES: &str = "('pending', 'requires_resubmission')";

#[derive(Clone)]
pub struct VerificationRepository {
    pool: SqlitePool,
}

impl VerificationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Pending queue, oldest submission first. `role` narrows the queue
    /// to one profile table; `None` spans both.
    pub async fn list_pending(
        &self,
        role: Option<ProfileRole>,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<PendingRow>> {
        let client_select = format!(
            "SELECT id, 'client' AS role, first_name, last_name, verification_status, \
             verification_submitted_at, resubmission_count, max_resubmission_attempts \
             FROM client WHERE verification_status IN {PENDING_STATES}"
        );
        let worker_select = format!(
            "SELECT id, 'worker' AS role, first_name, last_name, verification_status, \
             verification_submitted_at, resubmission_count, max_resubmission_attempts \
             FROM worker WHERE verification_status IN {PENDING_STATES}"
        );
        let source = match role {
            Some(ProfileRole::Client) => client_select,
            Some(ProfileRole::Worker) => worker_select,
            None => format!("{client_select} UNION ALL {worker_select}"),
        };
        let sql =
            format!("{source} ORDER BY verification_submitted_at ASC LIMIT ? OFFSET ?");
        let rows = sqlx::query_as::<_, PendingRow>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn count_pending(&self, role: Option<ProfileRole>) -> RepoResult<i64> {
        let sql = match role {
            Some(r) => format!(
                "SELECT COUNT(*) FROM {} WHERE verification_status IN {PENDING_STATES}",
                r.table()
            ),
            None => format!(
                "SELECT (SELECT COUNT(*) FROM client WHERE verification_status IN {PENDING_STATES}) \
                 + (SELECT COUNT(*) FROM worker WHERE verification_status IN {PENDING_STATES})"
            ),
        };
        Ok(sqlx::query_scalar::<_, i64>(&sql)
            .fetch_one(&self.pool)
            .await?)
    }

    /// Per-status counts across both profile tables
    pub async fn status_counts(&self) -> RepoResult<Vec<(String, i64)>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT verification_status, COUNT(*) FROM ( \
             SELECT verification_status FROM client \
             UNION ALL SELECT verification_status FROM worker) \
             GROUP BY verification_status ORDER BY verification_status",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn snapshot(&self, role: ProfileRole, id: &str) -> RepoResult<Option<ReviewSnapshot>> {
        let sql = format!(
            "SELECT verification_status, resubmission_count, max_resubmission_attempts \
             FROM {} WHERE id = ?",
            role.table()
        );
        let row = sqlx::query_as::<_, ReviewSnapshot>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Approve a pending profile. Clients additionally gain `is_verified`.
    /// `false` when no row with that id is currently reviewable.
    pub async fn approve(&self, role: ProfileRole, id: &str, notes: &str) -> RepoResult<bool> {
        let extra = match role {
            ProfileRole::Client => ", is_verified = 1",
            ProfileRole::Worker => "",
        };
        let sql = format!(
            "UPDATE {} SET verification_status = 'approved', verification_approved_at = ?, \
             verification_notes = ?, updated_at = ?{extra} \
             WHERE id = ? AND verification_status IN {PENDING_STATES}",
            role.table()
        );
        let now = now_millis();
        let result = sqlx::query(&sql)
            .bind(now)
            .bind(notes)
            .bind(now)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Reject a pending profile outright (no resubmission allowed)
    pub async fn reject_final(&self, role: ProfileRole, id: &str, notes: &str) -> RepoResult<bool> {
        let sql = format!(
            "UPDATE {} SET verification_status = 'rejected', verification_rejected_at = ?, \
             verification_notes = ?, updated_at = ? \
             WHERE id = ? AND verification_status IN {PENDING_STATES}",
            role.table()
        );
        let now = now_millis();
        let result = sqlx::query(&sql)
            .bind(now)
            .bind(notes)
            .bind(now)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Reject with resubmission: counted and capped. The count guard is
    /// part of the UPDATE, so a capped profile is left untouched.
    pub async fn reject_resubmission(
        &self,
        role: ProfileRole,
        id: &str,
        notes: &str,
    ) -> RepoResult<bool> {
        let sql = format!(
            "UPDATE {} SET verification_status = 'requires_resubmission', \
             verification_rejected_at = ?, verification_notes = ?, \
             resubmission_count = resubmission_count + 1, updated_at = ? \
             WHERE id = ? AND verification_status IN {PENDING_STATES} \
             AND resubmission_count < max_resubmission_attempts",
            role.table()
        );
        let now = now_millis();
        let result = sqlx::query(&sql)
            .bind(now)
            .bind(notes)
            .bind(now)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
