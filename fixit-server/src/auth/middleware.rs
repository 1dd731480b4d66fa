//! 认证中间件
//!
//! 管理员认证门卫。凭证以 httpOnly cookie (`adminToken`) 或
//! `Authorization: Bearer <token>` 头携带，cookie 优先。

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentAdmin, JwtService};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// 认证中间件 - 要求管理员登录
///
/// 验证成功后将 [`CurrentAdmin`] 注入请求扩展，handler 再从扩展中取出。
///
/// # 跳过认证的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径 (健康检查、Socket.IO 握手)
/// - `/api/auth/login` (登录接口)
///
/// # 错误处理
///
/// | 情况 | 状态码 / 错误码 |
/// |------|----------------|
/// | 无凭证 | 401 ADMIN_AUTH_REQUIRED |
/// | 令牌过期 | 403 ADMIN_TOKEN_EXPIRED |
/// | 令牌无效 | 403 ADMIN_TOKEN_INVALID |
/// | 管理员账号已不存在 | 401 ADMIN_NOT_FOUND |
pub async fn require_admin(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // 允许 CORS 预检的 OPTIONS 请求 (跳过认证)
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // 非 API 路由跳过认证 (让它们正常返回 404)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if path == "/api/auth/login" {
        return Ok(next.run(req).await);
    }

    let token = extract_token(&req).ok_or_else(|| {
        security_log!("WARN", "admin_auth_missing", uri = format!("{:?}", req.uri()));
        AppError::Unauthorized
    })?;

    let claims = state.jwt_service.validate_token(token).map_err(|e| {
        security_log!(
            "WARN",
            "admin_auth_failed",
            error = format!("{}", e),
            uri = format!("{:?}", req.uri())
        );
        match e {
            crate::auth::JwtError::ExpiredToken => AppError::TokenExpired,
            _ => AppError::InvalidToken,
        }
    })?;

    // 令牌有效但账号可能已被删除
    let admin = state
        .admins()
        .find_by_id(&claims.sub)
        .await
        .map_err(AppError::from)?
        .ok_or(AppError::AdminNotFound)?;

    req.extensions_mut().insert(CurrentAdmin {
        id: admin.id,
        username: admin.username,
    });
    Ok(next.run(req).await)
}

/// cookie 优先，其次 Authorization 头
fn extract_token(req: &Request) -> Option<&str> {
    if let Some(cookie_header) = req
        .headers()
        .get(http::header::COOKIE)
        .and_then(|h| h.to_str().ok())
        && let Some(token) = JwtService::extract_from_cookie(cookie_header)
    {
        return Some(token);
    }

    req.headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(JwtService::extract_from_header)
}
