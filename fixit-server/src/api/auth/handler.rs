//! Auth API Handlers

use std::time::Instant;

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use shared::models::AdminLogin;

use crate::auth::{ADMIN_COOKIE, verify_password};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::validation::{MAX_PASSWORD_LEN, MAX_SHORT_TEXT_LEN, validate_required_text};
use crate::utils::{ApiResponse, AppError, AppResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSummary {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub token: String,
    pub admin: AdminSummary,
}

/// POST /api/auth/login
///
/// 成功时同时以 httpOnly cookie 和响应体返回令牌。
/// 用户名不存在和密码错误返回同一个错误码，不泄露账号是否存在。
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<AdminLogin>,
) -> AppResult<Response> {
    let started = Instant::now();

    validate_required_text(&payload.username, "username", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.password, "password", MAX_PASSWORD_LEN)?;

    let admin = state
        .admins()
        .find_by_username(payload.username.trim())
        .await
        .map_err(AppError::from)?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(&payload.password, &admin.password_hash)? {
        security_log!("WARN", "admin_login_failed", username = admin.username);
        return Err(AppError::InvalidCredentials);
    }

    let token = state
        .jwt_service
        .generate_token(&admin.id, &admin.username)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    security_log!("INFO", "admin_login", username = admin.username);

    let cookie = login_cookie(&state, &token);
    let body = ApiResponse::ok(
        "ADMIN_LOGIN_SUCCESS",
        "Login successful",
        LoginData {
            token,
            admin: AdminSummary {
                id: admin.id,
                username: admin.username,
            },
        },
    )
    .with_meta(started);

    Ok(([(http::header::SET_COOKIE, cookie)], Json(body)).into_response())
}

/// POST /api/auth/logout
///
/// 清除管理员 cookie。令牌本身不吊销，依赖过期时间。
pub async fn logout(State(state): State<ServerState>) -> AppResult<Response> {
    let started = Instant::now();

    let cookie = format!(
        "{ADMIN_COOKIE}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0{}",
        secure_suffix(&state)
    );
    let body =
        ApiResponse::ok("ADMIN_LOGOUT_SUCCESS", "Logout successful", ()).with_meta(started);
    Ok(([(http::header::SET_COOKIE, cookie)], Json(body)).into_response())
}

fn login_cookie(state: &ServerState, token: &str) -> String {
    let max_age = state.jwt_service.config.expiration_minutes * 60;
    format!(
        "{ADMIN_COOKIE}={token}; HttpOnly; Path=/; SameSite=Lax; Max-Age={max_age}{}",
        secure_suffix(state)
    )
}

fn secure_suffix(state: &ServerState) -> &'static str {
    if state.config.is_production() {
        "; Secure"
    } else {
        ""
    }
}
