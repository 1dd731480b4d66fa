//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 管理员登录 / 登出
//! - [`archived`] - 归档任务列表与恢复
//! - [`jobs`] - 活跃任务列表与归档
//! - [`id_verification`] - 实名认证审核
//! - [`client_management`] - 客户封禁管理

pub mod archived;
pub mod auth;
pub mod client_management;
pub mod health;
pub mod id_verification;
pub mod jobs;

// Re-export common types for handlers
pub use crate::utils::{ApiResponse, AppResult};
