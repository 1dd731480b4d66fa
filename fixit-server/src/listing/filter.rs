//! 过滤条件编译
//!
//! Compiles a normalized [`ListQuery`] plus the soft-delete view into a
//! SQL WHERE fragment and an ordered bind list. The `is_deleted` flag is
//! always forced by the endpoint, never taken from user input, so the
//! active and archived listings can never leak into each other.

use super::normalize::ListQuery;

/// 软删除视图：二选一，永远强制
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletedView {
    ActiveOnly,
    ArchivedOnly,
}

impl DeletedView {
    fn flag(self) -> i64 {
        match self {
            Self::ActiveOnly => 0,
            Self::ArchivedOnly => 1,
        }
    }
}

/// 编译后的查询谓词 (WHERE 片段 + 绑定参数)
#[derive(Debug, Clone, PartialEq)]
pub struct JobFilter {
    pub where_sql: String,
    pub binds: Vec<String>,
}

impl JobFilter {
    /// 纯函数：ListQuery × DeletedView → JobFilter
    pub fn compile(query: &ListQuery, view: DeletedView) -> Self {
        // is_deleted 来自枚举，不经过绑定参数
        let mut clauses = vec![format!("j.is_deleted = {}", view.flag())];
        let mut binds: Vec<String> = Vec::new();

        if let Some(status) = query.status {
            clauses.push("j.status = ?".to_string());
            binds.push(status.as_str().to_string());
        }
        if let Some(category) = &query.category {
            clauses.push("j.category_id = ?".to_string());
            binds.push(category.clone());
        }
        if let Some(client_id) = &query.client_id {
            clauses.push("j.client_id = ?".to_string());
            binds.push(client_id.clone());
        }
        if let Some(location) = &query.location {
            clauses.push("j.location LIKE ? ESCAPE '\\'".to_string());
            binds.push(contains_pattern(location));
        }
        if let Some(search) = &query.search {
            clauses.push("j.description LIKE ? ESCAPE '\\'".to_string());
            binds.push(contains_pattern(search));
        }

        Self {
            where_sql: clauses.join(" AND "),
            binds,
        }
    }
}

/// 子串匹配模式。LIKE 在 SQLite 中对 ASCII 不区分大小写；
/// 用户输入中的通配符必须转义后再包进 `%...%`。
fn contains_pattern(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::normalize::{ListQuery, RawListQuery};
    use shared::models::JobStatus;

    fn base_query() -> ListQuery {
        ListQuery::normalize(RawListQuery::default()).unwrap()
    }

    #[test]
    fn view_flag_always_present() {
        let q = base_query();
        let active = JobFilter::compile(&q, DeletedView::ActiveOnly);
        let archived = JobFilter::compile(&q, DeletedView::ArchivedOnly);
        assert_eq!(active.where_sql, "j.is_deleted = 0");
        assert_eq!(archived.where_sql, "j.is_deleted = 1");
        assert!(active.binds.is_empty());
    }

    #[test]
    fn exact_filters_become_equality_binds() {
        let mut q = base_query();
        q.status = Some(JobStatus::Completed);
        q.client_id = Some("507f1f77bcf86cd799439011".to_string());
        let f = JobFilter::compile(&q, DeletedView::ArchivedOnly);
        assert_eq!(
            f.where_sql,
            "j.is_deleted = 1 AND j.status = ? AND j.client_id = ?"
        );
        assert_eq!(f.binds, vec!["completed", "507f1f77bcf86cd799439011"]);
    }

    #[test]
    fn free_text_becomes_substring_pattern() {
        let mut q = base_query();
        q.search = Some("leaky pipe".to_string());
        let f = JobFilter::compile(&q, DeletedView::ActiveOnly);
        assert!(f.where_sql.contains("j.description LIKE ? ESCAPE '\\'"));
        assert_eq!(f.binds, vec!["%leaky pipe%"]);
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(contains_pattern("50%_off\\x"), "%50\\%\\_off\\\\x%");
    }
}
