//! Client Repository

use shared::models::Client;
use shared::util::now_millis;
use sqlx::SqlitePool;

use super::RepoResult;

#[derive(Clone)]
pub struct ClientRepository {
    pool: SqlitePool,
}

impl ClientRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Client>> {
        let client = sqlx::query_as::<_, Client>("SELECT * FROM client WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(client)
    }

    /// Flip the moderation flag, guarded on the current value.
    ///
    /// `None` means no client with that id is currently in the opposite
    /// state; blocking a blocked client falls out of the guard the same
    /// way restoring an active job does.
    pub async fn set_blocked(&self, id: &str, blocked: bool) -> RepoResult<Option<Client>> {
        let result =
            sqlx::query("UPDATE client SET blocked = ?, updated_at = ? WHERE id = ? AND blocked = ?")
                .bind(blocked)
                .bind(now_millis())
                .bind(id)
                .bind(!blocked)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    /// Insert a client row (admin tooling and tests)
    pub async fn create(&self, client: &Client) -> RepoResult<()> {
        sqlx::query(
            "INSERT INTO client (id, credential_id, email, first_name, last_name, \
             profile_picture_url, is_verified, blocked, verification_status, \
             verification_submitted_at, verification_approved_at, verification_rejected_at, \
             verification_notes, resubmission_count, max_resubmission_attempts, \
             created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&client.id)
        .bind(&client.credential_id)
        .bind(&client.email)
        .bind(&client.first_name)
        .bind(&client.last_name)
        .bind(&client.profile_picture_url)
        .bind(client.is_verified)
        .bind(client.blocked)
        .bind(client.verification_status.as_str())
        .bind(client.verification_submitted_at)
        .bind(client.verification_approved_at)
        .bind(client.verification_rejected_at)
        .bind(&client.verification_notes)
        .bind(client.resubmission_count)
        .bind(client.max_resubmission_attempts)
        .bind(client.created_at)
        .bind(client.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
