//! Admin Model (后台管理员)

use serde::{Deserialize, Serialize};

/// Back-office administrator account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Admin {
    pub id: String,
    pub username: String,
    /// Argon2 hash — never leaves the server
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Login payload
#[derive(Debug, Clone, Deserialize)]
pub struct AdminLogin {
    pub username: String,
    pub password: String,
}
