//! Job Model (服务工单)

use serde::{Deserialize, Serialize};

/// Job progress status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum JobStatus {
    Open,
    InProgress,
    Completed,
    Cancelled,
}

impl JobStatus {
    /// 解析查询参数中的状态值
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "open" => Some(Self::Open),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Soft-delete lifecycle of a job
///
/// A job is either live on the marketplace or archived by an admin
/// action. Archived jobs are never physically erased; restore moves
/// them back to `Active`. The tagged state keeps the two transitions
/// explicit — repositories guard each transition on the expected
/// current state, so archiving an archived job is a not-found, not a
/// silent overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Active,
    Archived,
}

impl JobState {
    /// Persisted form: the `is_deleted` column
    pub fn is_deleted(self) -> bool {
        matches!(self, Self::Archived)
    }

    pub fn from_flag(is_deleted: bool) -> Self {
        if is_deleted { Self::Archived } else { Self::Active }
    }
}

/// Job record — a service request posted by a client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Job {
    pub id: String,
    /// Owning client profile id
    pub client_id: String,
    /// Skill category id (optional, category may have been removed)
    pub category_id: Option<String>,
    /// Worker hired for this job, if any
    pub hired_worker_id: Option<String>,
    pub description: String,
    pub price: f64,
    pub location: String,
    pub status: JobStatus,
    /// Soft-delete flag, owned exclusively by the job itself
    pub is_deleted: bool,
    /// Unix millis
    pub created_at: i64,
    /// Unix millis
    pub updated_at: i64,
}

impl Job {
    pub fn state(&self) -> JobState {
        JobState::from_flag(self.is_deleted)
    }
}
