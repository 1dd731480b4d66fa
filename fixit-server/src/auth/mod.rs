//! 认证模块
//!
//! - [`jwt`] - 令牌生成与验证
//! - [`middleware`] - 管理员认证门卫
//! - [`password`] - Argon2 密码哈希

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{ADMIN_COOKIE, Claims, JwtConfig, JwtError, JwtService};
pub use middleware::require_admin;
pub use password::{hash_password, verify_password};

/// 已通过认证的管理员，注入请求扩展供 handler 使用
#[derive(Debug, Clone)]
pub struct CurrentAdmin {
    pub id: String,
    pub username: String,
}
