//! FixIt Server - 家政维修市场后端
//!
//! # 架构概述
//!
//! - **列表查询** (`listing`): 规范化 → 过滤编译 → 分页 → 投影的查询管线
//! - **数据库** (`db`): SQLite (sqlx) 存储与仓库层
//! - **认证** (`auth`): JWT + Argon2 管理员认证
//! - **HTTP API** (`api`): RESTful 管理接口
//! - **消息网关** (`message`): Socket.IO 实时消息转发
//!
//! # 模块结构
//!
//! ```text
//! fixit-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、密码哈希
//! ├── listing/       # 列表查询子系统
//! ├── api/           # HTTP 路由和处理器
//! ├── message/       # Socket.IO 消息网关
//! ├── db/            # 数据库层
//! └── utils/         # 错误、日志、加密、校验
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod listing;
pub mod message;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentAdmin, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{ApiResponse, AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
    ______ _      __  __
   / ____/(_)_  _|  \/  |
  / /_   / /\ \/ / |\/| |
 / __/  / /  >  <| |  | |
/_/    /_/  /_/\_\_|  |_|
        FixIt Server
    "#
    );
}

/// 设置运行环境: dotenv、工作目录、日志
pub fn setup_environment() -> Result<Config, Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();

    let config = Config::from_env();
    config.ensure_dirs()?;

    let log_level = std::env::var("LOG_LEVEL").ok();
    init_logger_with_file(log_level.as_deref(), Some(&config.log_dir()));

    Ok(config)
}
