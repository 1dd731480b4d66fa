//! Client Model (雇主档案)

use serde::{Deserialize, Serialize};

use super::VerificationStatus;

/// Client profile — the job-posting side of the marketplace
///
/// `first_name` / `last_name` are stored field-encrypted (AES-GCM, hex);
/// they are only ever decrypted inside the result projector when building
/// client-safe DTOs. Never serialize the raw columns to API consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Client {
    pub id: String,
    /// Login credential id (unique per profile)
    pub credential_id: String,
    pub email: String,
    /// Encrypted at rest
    pub first_name: String,
    /// Encrypted at rest
    pub last_name: String,
    pub profile_picture_url: Option<String>,
    pub is_verified: bool,
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
