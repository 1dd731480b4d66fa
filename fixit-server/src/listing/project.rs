//! 结果投影
//!
//! Turns raw joined rows into client-safe DTOs. Two rules carried over
//! from the production data:
//!
//! - A job whose owning client row is gone is dropped from `items`
//!   entirely, not nulled, so `items.len()` can be below `itemsPerPage`.
//!   `totalItems` still reflects the pre-projection count.
//! - Client first/last name are stored encrypted; a decryption failure
//!   for any field fails the whole request with an internal error.

use serde::Serialize;
use shared::util::millis_to_iso;

use crate::db::repository::job::JobJoinRow;
use crate::utils::{AppError, AppResult, FieldCipher};

/// 类别引用
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRef {
    pub id: String,
    pub name: String,
}

/// 客户引用 (姓名已解密)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRef {
    pub id: String,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
}

/// 雇佣工人引用
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerRef {
    pub id: String,
    pub full_name: String,
}

/// 列表响应中的单个任务
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDto {
    pub id: String,
    pub description: String,
    pub price: f64,
    pub location: String,
    pub status: String,
    pub is_deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRef>,
    pub client: ClientRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hired_worker: Option<WorkerRef>,
    pub created_at: String,
    pub updated_at: String,
}

/// 投影一页原始行。缺失 client 的行被丢弃。
pub fn project_jobs(rows: Vec<JobJoinRow>, cipher: &FieldCipher) -> AppResult<Vec<JobDto>> {
    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        if let Some(dto) = project_job(row, cipher)? {
            items.push(dto);
        }
    }
    Ok(items)
}

/// 单行投影。返回 `Ok(None)` 表示该行因缺失 client 被丢弃。
fn project_job(row: JobJoinRow, cipher: &FieldCipher) -> AppResult<Option<JobDto>> {
    // LEFT JOIN 未命中 client 时这些列为 NULL
    let (Some(client_id), Some(enc_first), Some(enc_last), Some(email)) = (
        row.client_row_id,
        row.client_first_name,
        row.client_last_name,
        row.client_email,
    ) else {
        return Ok(None);
    };

    let first = cipher
        .decrypt(&enc_first)
        .map_err(|e| AppError::internal(format!("client name decryption failed: {e}")))?;
    let last = cipher
        .decrypt(&enc_last)
        .map_err(|e| AppError::internal(format!("client name decryption failed: {e}")))?;

    let category = match (row.category_id, row.category_name) {
        (Some(id), Some(name)) => Some(CategoryRef { id, name }),
        _ => None,
    };

    let hired_worker = match (row.worker_row_id, row.worker_first_name, row.worker_last_name) {
        (Some(id), Some(first), Some(last)) => Some(WorkerRef {
            id,
            full_name: format!("{first} {last}"),
        }),
        _ => None,
    };

    Ok(Some(JobDto {
        id: row.id,
        description: row.description,
        price: row.price,
        location: row.location,
        status: row.status.as_str().to_string(),
        is_deleted: row.is_deleted,
        category,
        client: ClientRef {
            id: client_id,
            full_name: format!("{first} {last}"),
            email,
            profile_picture_url: row.client_profile_picture_url,
        },
        hired_worker,
        created_at: millis_to_iso(row.created_at),
        updated_at: millis_to_iso(row.updated_at),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::JobStatus;

    fn cipher() -> FieldCipher {
        FieldCipher::with_key(*b"0123456789abcdef").unwrap()
    }

    fn row_with_client(cipher: &FieldCipher) -> JobJoinRow {
        JobJoinRow {
            id: "64f1c0ffee64f1c0ffee64f1".into(),
            description: "Fix kitchen sink".into(),
            price: 120.0,
            location: "Valletta".into(),
            status: JobStatus::Completed,
            is_deleted: true,
            created_at: 1_700_000_000_000,
            updated_at: 1_700_000_500_000,
            category_id: Some("64f1c0ffee64f1c0ffee0001".into()),
            category_name: Some("Plumbing".into()),
            client_row_id: Some("507f1f77bcf86cd799439011".into()),
            client_first_name: Some(cipher.encrypt("Maria").unwrap()),
            client_last_name: Some(cipher.encrypt("Borg").unwrap()),
            client_email: Some("maria@example.com".into()),
            client_profile_picture_url: None,
            worker_row_id: None,
            worker_first_name: None,
            worker_last_name: None,
        }
    }

    #[test]
    fn projects_row_and_decrypts_names() {
        let c = cipher();
        let dtos = project_jobs(vec![row_with_client(&c)], &c).unwrap();
        assert_eq!(dtos.len(), 1);
        assert_eq!(dtos[0].client.full_name, "Maria Borg");
        assert_eq!(dtos[0].status, "completed");
        assert!(dtos[0].is_deleted);
        assert_eq!(dtos[0].category.as_ref().unwrap().name, "Plumbing");
        assert!(dtos[0].hired_worker.is_none());
    }

    #[test]
    fn drops_rows_with_missing_client() {
        let c = cipher();
        let mut orphan = row_with_client(&c);
        orphan.client_row_id = None;
        orphan.client_first_name = None;
        orphan.client_last_name = None;
        orphan.client_email = None;

        let dtos = project_jobs(vec![row_with_client(&c), orphan], &c).unwrap();
        assert_eq!(dtos.len(), 1);
    }

    #[test]
    fn decryption_failure_fails_the_request() {
        let c = cipher();
        let mut bad = row_with_client(&c);
        bad.client_first_name = Some("deadbeef".into());
        let err = project_jobs(vec![bad], &c).unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
