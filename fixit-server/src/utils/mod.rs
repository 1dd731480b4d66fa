//! 通用工具模块
//!
//! - [`error`] - 统一错误类型与 API 响应结构
//! - [`crypto`] - 字段级加解密 (client 姓名)
//! - [`logger`] - 日志初始化
//! - [`validation`] - 请求体校验辅助函数

pub mod crypto;
pub mod error;
pub mod logger;
pub mod result;
pub mod validation;

pub use crypto::{CryptoError, FieldCipher};
pub use error::{ApiResponse, AppError, FieldError, Meta};
pub use result::AppResult;
