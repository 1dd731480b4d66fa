//! Worker Model (工人档案)

use serde::{Deserialize, Serialize};

use super::VerificationStatus;

/// Worker availability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum WorkerStatus {
    Available,
    Working,
    NotAvailable,
}

/// Worker profile — the job-taking side of the marketplace
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Worker {
    pub id: String,
    /// Login credential id (unique per profile)
    pub credential_id: String,
    pub first_name: String,
    pub last_name: String,
    pub profile_picture_url: Option<String>,
    pub status: WorkerStatus,
    /// Admin moderation flag
    pub blocked: bool,
    pub verification_status: VerificationStatus,
    pub verification_submitted_at: Option<i64>,
    pub verification_approved_at: Option<i64>,
    pub verification_rejected_at: Option<i64>,
    pub verification_notes: String,
    pub resubmission_count: i64,
    pub max_resubmission_attempts: i64,
    pub created_at: i64,
    pub updated_at: i64,
}
