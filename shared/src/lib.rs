//! Shared types for the FixIt marketplace
//!
//! Domain models and utility types used by fixit-server and, over the
//! API boundary, by the admin panel and customer frontend.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
