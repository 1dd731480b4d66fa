//! 查询参数规范化
//!
//! Raw query-string parameters arrive as untyped strings. Normalization
//! trims them, applies defaults, and validates every field before any
//! database work happens. All field errors are accumulated and returned
//! together instead of stopping at the first failure. Unknown query
//! parameters are silently dropped by serde.

use serde::{Deserialize, Serialize};
use shared::models::JobStatus;
use shared::util::is_object_id;

use crate::utils::{AppError, AppResult, FieldError};

/// 分页默认值与上限
pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// 原始查询参数 (全部为可选字符串)
#[derive(Debug, Default, Deserialize)]
pub struct RawListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub search: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub order: Option<String>,
    #[serde(rename = "clientId")]
    pub client_id: Option<String>,
}

/// 排序字段，白名单限定，直接映射到列名
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Price,
    Status,
}

impl SortField {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "createdAt" => Some(Self::CreatedAt),
            "updatedAt" => Some(Self::UpdatedAt),
            "price" => Some(Self::Price),
            "status" => Some(Self::Status),
            _ => None,
        }
    }

    /// ORDER BY 子句使用的列名。枚举保证列名不可能来自用户输入。
    pub fn column(self) -> &'static str {
        match self {
            Self::CreatedAt => "j.created_at",
            Self::UpdatedAt => "j.updated_at",
            Self::Price => "j.price",
            Self::Status => "j.status",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
            Self::Price => "price",
            Self::Status => "status",
        }
    }
}

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// 规范化后的列表查询
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub page: i64,
    pub limit: i64,
    pub status: Option<JobStatus>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub search: Option<String>,
    pub sort_by: SortField,
    pub order: SortOrder,
    pub client_id: Option<String>,
}

/// 响应中回显的过滤条件
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedFilters {
    pub status: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub search: Option<String>,
    pub client_id: Option<String>,
    pub sort_by: String,
    pub order: String,
}

impl ListQuery {
    /// 规范化原始参数，累积所有字段错误
    pub fn normalize(raw: RawListQuery) -> AppResult<Self> {
        let mut errors: Vec<FieldError> = Vec::new();

        let page = parse_positive_int(raw.page, "page", DEFAULT_PAGE, i64::MAX, &mut errors);
        let limit = parse_positive_int(raw.limit, "limit", DEFAULT_LIMIT, MAX_LIMIT, &mut errors);

        let status = match trimmed(raw.status, "status", &mut errors) {
            Some(s) => match JobStatus::parse(&s) {
                Some(st) => Some(st),
                None => {
                    errors.push(FieldError::new(
                        "status",
                        "status must be one of: open, in_progress, completed, cancelled",
                    ));
                    None
                }
            },
            None => None,
        };

        let category = match trimmed(raw.category, "category", &mut errors) {
            Some(s) => {
                if is_object_id(&s) {
                    Some(s)
                } else {
                    errors.push(FieldError::new(
                        "category",
                        "category must be a valid 24-character hex id",
                    ));
                    None
                }
            }
            None => None,
        };

        let location = bounded_text(raw.location, "location", &mut errors);
        let search = bounded_text(raw.search, "search", &mut errors);

        let sort_by = match trimmed(raw.sort_by, "sortBy", &mut errors) {
            Some(s) => match SortField::parse(&s) {
                Some(f) => f,
                None => {
                    errors.push(FieldError::new(
                        "sortBy",
                        "sortBy must be one of: createdAt, updatedAt, price, status",
                    ));
                    SortField::default()
                }
            },
            None => SortField::default(),
        };

        let order = match trimmed(raw.order, "order", &mut errors) {
            Some(s) => match SortOrder::parse(&s) {
                Some(o) => o,
                None => {
                    errors.push(FieldError::new("order", "order must be 'asc' or 'desc'"));
                    SortOrder::default()
                }
            },
            None => SortOrder::default(),
        };

        let client_id = match trimmed(raw.client_id, "clientId", &mut errors) {
            Some(s) => {
                if is_object_id(&s) {
                    Some(s)
                } else {
                    errors.push(FieldError::new(
                        "clientId",
                        "clientId must be a valid 24-character hex id",
                    ));
                    None
                }
            }
            None => None,
        };

        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        Ok(Self {
            page,
            limit,
            status,
            category,
            location,
            search,
            sort_by,
            order,
            client_id,
        })
    }

    /// OFFSET = (page - 1) * limit。page 没有上限，饱和而不是溢出；
    /// 饱和后的 OFFSET 只会让查询返回零行。
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn applied_filters(&self) -> AppliedFilters {
        AppliedFilters {
            status: self.status.map(|s| s.as_str().to_string()),
            category: self.category.clone(),
            location: self.location.clone(),
            search: self.search.clone(),
            client_id: self.client_id.clone(),
            sort_by: self.sort_by.as_str().to_string(),
            order: self.order.sql().to_lowercase(),
        }
    }
}

/// 去除首尾空白；空串视为缺失并记录错误
fn trimmed(
    value: Option<String>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    let v = value?;
    let t = v.trim();
    if t.is_empty() {
        errors.push(FieldError::new(field, format!("{field} must not be empty")));
        return None;
    }
    Some(t.to_string())
}

/// 自由文本过滤值，限制长度防止恶意超长参数
fn bounded_text(
    value: Option<String>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    let t = trimmed(value, field, errors)?;
    if t.len() > crate::utils::validation::MAX_SHORT_TEXT_LEN {
        errors.push(FieldError::new(
            field,
            format!(
                "{field} is too long (max {} chars)",
                crate::utils::validation::MAX_SHORT_TEXT_LEN
            ),
        ));
        return None;
    }
    Some(t)
}

fn parse_positive_int(
    value: Option<String>,
    field: &str,
    default: i64,
    max: i64,
    errors: &mut Vec<FieldError>,
) -> i64 {
    let Some(raw) = value else {
        return default;
    };
    let t = raw.trim();
    if t.is_empty() {
        errors.push(FieldError::new(field, format!("{field} must not be empty")));
        return default;
    }
    match t.parse::<i64>() {
        Ok(n) if n >= 1 && n <= max => n,
        Ok(_) | Err(_) => {
            let message = if max == i64::MAX {
                format!("{field} must be an integer >= 1")
            } else {
                format!("{field} must be an integer between 1 and {max}")
            };
            errors.push(FieldError::new(field, message));
            default
        }
    }
}
