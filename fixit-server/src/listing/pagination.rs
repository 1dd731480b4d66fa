//! 分页元数据
//!
//! `hasPrevPage` follows the `page > 1` formula even when the result set
//! is empty, and a page past the end is not clamped; the query simply
//! returns zero rows. Both behaviors are intentional.

use serde::Serialize;

/// 分页信息，随列表响应返回
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub items_per_page: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    /// total_pages = ceil(total_items / limit)
    pub fn compute(total_items: i64, page: i64, limit: i64) -> Self {
        let total_pages = if total_items == 0 {
            0
        } else {
            (total_items + limit - 1) / limit
        };
        Self {
            current_page: page,
            total_pages,
            total_items,
            items_per_page: limit,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        }
    }

    /// 空结果集的分页信息 (totalPages = 0)
    pub fn empty(page: i64, limit: i64) -> Self {
        Self::compute(0, page, limit)
    }
}
