//! Skill Category Model (技能分类)

use serde::{Deserialize, Serialize};

/// Skill category a job is posted under
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Category {
    pub id: String,
    pub name: String,
}
