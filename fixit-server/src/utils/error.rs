//! 统一错误处理
//!
//! 提供应用级错误类型和响应结构：
//! - [`AppError`] - 应用错误枚举
//! - [`ApiResponse`] - API 响应结构 (FixIt envelope)
//!
//! # 错误码规范
//!
//! | 错误码 | HTTP | 说明 |
//! |--------|------|------|
//! | VALIDATION_ERROR | 400 | 参数校验失败 (携带逐字段错误列表) |
//! | INVALID_ID | 400 | id 不是合法的对象 id |
//! | *_NOT_FOUND | 404 | 目标不存在或不处于期望状态 |
//! | ADMIN_AUTH_REQUIRED | 401 | 缺少管理员凭证 |
//! | ADMIN_TOKEN_EXPIRED / ADMIN_TOKEN_INVALID | 403 | 凭证过期 / 无效 |
//! | INTERNAL_ERROR | 500 | 内部错误 (细节只记日志，不返回客户端) |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// 单个字段的校验错误
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// 响应 meta (处理耗时 + 时间戳)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub processing_time: String,
    pub timestamp: String,
}

impl Meta {
    /// 从请求开始时刻构造
    pub fn since(started: std::time::Instant) -> Self {
        Self {
            processing_time: format!("{}ms", started.elapsed().as_millis()),
            timestamp: shared::util::now_iso(),
        }
    }
}

/// API 统一响应结构
///
/// ```json
/// {
///   "success": true,
///   "message": "Archived jobs retrieved successfully",
///   "code": "ARCHIVED_JOBS_RETRIEVED",
///   "data": { ... },
///   "meta": { "processingTime": "3ms", "timestamp": "..." }
/// }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应 (带业务码)
    pub fn ok(code: &str, message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            code: Some(code.to_string()),
            data: Some(data),
            errors: None,
            meta: None,
        }
    }

    /// 附加 meta 信息
    pub fn with_meta(mut self, started: std::time::Instant) -> Self {
        self.meta = Some(Meta::since(started));
        self
    }
}

/// 应用错误枚举
///
/// 校验和 not-found 错误在产生处直接构造并立即返回；
/// 其余错误在 handler 边界统一转换为 INTERNAL_ERROR，
/// 细节只进服务端日志。所有操作均为单次尝试，无重试。
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== 认证错误 ==========
    #[error("Admin authentication required")]
    Unauthorized,

    #[error("Admin token expired")]
    TokenExpired,

    #[error("Invalid admin token")]
    InvalidToken,

    #[error("Admin not found")]
    AdminNotFound,

    #[error("Invalid username or password")]
    InvalidCredentials,

    // ========== 业务逻辑错误 ==========
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    InvalidId(String),

    #[error("{message}")]
    NotFound {
        code: &'static str,
        message: String,
    },

    #[error("{message}")]
    Conflict {
        code: &'static str,
        message: String,
    },

    // ========== 系统错误 ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// 单字段校验错误
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(vec![FieldError::new(field, message)])
    }

    /// 非法对象 id (格式不合法，与 not-found 区分)
    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::InvalidId(message.into())
    }

    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            message: message.into(),
        }
    }

    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// HTTP 状态码 + 错误码 + 客户端可见消息
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "ADMIN_AUTH_REQUIRED",
                "Admin authentication required".into(),
            ),
            Self::TokenExpired => (
                StatusCode::FORBIDDEN,
                "ADMIN_TOKEN_EXPIRED",
                "Invalid or expired admin token".into(),
            ),
            Self::InvalidToken => (
                StatusCode::FORBIDDEN,
                "ADMIN_TOKEN_INVALID",
                "Invalid or expired admin token".into(),
            ),
            Self::AdminNotFound => (
                StatusCode::UNAUTHORIZED,
                "ADMIN_NOT_FOUND",
                "Admin not found".into(),
            ),
            Self::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "Invalid username or password".into(),
            ),
            Self::Validation(_) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Validation failed".into(),
            ),
            Self::InvalidId(msg) => (StatusCode::BAD_REQUEST, "INVALID_ID", msg.clone()),
            Self::NotFound { code, message } => {
                (StatusCode::NOT_FOUND, *code, message.clone())
            }
            Self::Conflict { code, message } => {
                (StatusCode::CONFLICT, *code, message.clone())
            }
            Self::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".into(),
                )
            }
            Self::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".into(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        let errors = match self {
            Self::Validation(fields) => Some(fields),
            _ => None,
        };

        let body = Json(ApiResponse::<()> {
            success: false,
            message,
            code: Some(code.to_string()),
            data: None,
            errors,
            meta: None,
        });

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Database(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400_with_field_list() {
        let err = AppError::Validation(vec![
            FieldError::new("limit", "limit must be between 1 and 100"),
            FieldError::new("page", "page must be an integer >= 1"),
        ]);
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_keeps_domain_code() {
        let (status, code, _) =
            AppError::not_found("JOB_NOT_FOUND", "Archived job not found").parts();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "JOB_NOT_FOUND");
    }

    #[test]
    fn internal_never_leaks_detail() {
        let (_, code, message) = AppError::internal("decryption failed: bad key").parts();
        assert_eq!(code, "INTERNAL_ERROR");
        assert_eq!(message, "Internal server error");
    }
}
