//! ID Verification (实名认证)
//!
//! Workers and clients go through the same review flow: they submit an
//! ID picture plus a selfie, and an admin approves or rejects the pair.
//! Rejection may require resubmission, which is counted and capped.

use serde::{Deserialize, Serialize};

/// Review state of a user's identity documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum VerificationStatus {
    NotSubmitted,
    Pending,
    Approved,
    Rejected,
    RequiresResubmission,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotSubmitted => "not_submitted",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::RequiresResubmission => "requires_resubmission",
        }
    }

    /// 是否处于可审批状态 (待审 / 等待重新提交)
    pub fn is_reviewable(&self) -> bool {
        matches!(self, Self::Pending | Self::RequiresResubmission)
    }
}

/// Approve payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationApprove {
    /// Reviewer notes, stored on the profile
    pub notes: Option<String>,
}

/// Reject payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReject {
    /// Reviewer notes / rejection reason
    pub notes: Option<String>,
    /// When true (default), the user may fix and resubmit documents
    pub require_resubmission: Option<bool>,
}
