//! 列表查询子系统
//!
//! Query pipeline for paged admin listings:
//! normalize → compile filter → fetch page + count → paginate → project.
//!
//! - [`normalize`] - raw query-string values → validated [`ListQuery`]
//! - [`filter`] - [`ListQuery`] + soft-delete view → SQL predicate
//! - [`pagination`] - matched count → page metadata
//! - [`project`] - joined rows → client-safe DTOs

pub mod filter;
pub mod normalize;
pub mod pagination;
pub mod project;

pub use filter::{DeletedView, JobFilter};
pub use normalize::{AppliedFilters, ListQuery, RawListQuery, SortField, SortOrder};
pub use pagination::Pagination;
pub use project::{JobDto, project_jobs};
