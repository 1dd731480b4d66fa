//! Admin Repository

use shared::models::Admin;
use shared::util::{now_millis, object_id};
use sqlx::SqlitePool;

use super::RepoResult;

#[derive(Clone)]
pub struct AdminRepository {
    pool: SqlitePool,
}

impl AdminRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Admin>> {
        let admin = sqlx::query_as::<_, Admin>("SELECT * FROM admin WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(admin)
    }

    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<Admin>> {
        let admin = sqlx::query_as::<_, Admin>("SELECT * FROM admin WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(admin)
    }

    /// Create the bootstrap admin account if the table is empty.
    /// Returns the created id, or `None` when an admin already exists.
    pub async fn ensure_bootstrap(
        &self,
        username: &str,
        password_hash: &str,
    ) -> RepoResult<Option<String>> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admin")
            .fetch_one(&self.pool)
            .await?;
        if count > 0 {
            return Ok(None);
        }

        let id = object_id();
        let now = now_millis();
        sqlx::query(
            "INSERT INTO admin (id, username, password_hash, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(username)
        .bind(password_hash)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(Some(id))
    }
}
