//! Data models
//!
//! Shared between fixit-server and the admin/customer frontends (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are 24-hex-char object ids (TEXT PRIMARY KEY).

pub mod admin;
pub mod category;
pub mod client;
pub mod job;
pub mod verification;
pub mod worker;

// Re-exports
pub use admin::*;
pub use category::*;
pub use client::*;
pub use job::*;
pub use verification::*;
pub use worker::*;
