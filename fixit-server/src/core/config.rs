//! 服务器配置

use crate::auth::JwtConfig;

/// 服务器配置 - 所有配置项
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (数据库、日志) |
/// | PORT | 5000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | FRONTEND_ORIGIN | http://localhost:3000 | CORS 允许的前端来源 |
/// | DATABASE_PATH | {WORK_DIR}/fixit.db | SQLite 数据库文件 |
/// | ADMIN_USERNAME | admin | 引导管理员用户名 |
/// | ADMIN_PASSWORD | (无) | 引导管理员密码，未设置则不创建 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/fixit PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// CORS 允许的前端来源
    pub frontend_origin: String,
    /// SQLite 数据库文件路径
    pub database_path: String,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 引导管理员用户名
    pub admin_username: String,
    /// 引导管理员密码 (未设置则跳过引导)
    pub admin_password: Option<String>,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
}

impl Config {
    /// 从环境变量加载配置，未设置的项使用默认值
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let database_path = std::env::var("DATABASE_PATH")
            .unwrap_or_else(|_| format!("{work_dir}/fixit.db"));

        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            frontend_origin: std::env::var("FRONTEND_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            jwt: JwtConfig::default(),
            admin_username: std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into()),
            admin_password: std::env::var("ADMIN_PASSWORD").ok(),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            work_dir,
            database_path,
        }
    }

    /// 日志目录
    pub fn log_dir(&self) -> String {
        format!("{}/logs", self.work_dir)
    }

    /// 创建工作目录和日志目录
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.work_dir)?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
