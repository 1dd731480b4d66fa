//! Repository Module
//!
//! CRUD operations over the SQLite pool. Repositories return `Option`
//! for lookups and state transitions; the HTTP layer decides which
//! domain error code a miss maps to.

pub mod admin;
pub mod client;
pub mod job;
pub mod verification;
pub mod worker;

pub use admin::AdminRepository;
pub use client::ClientRepository;
pub use job::JobRepository;
pub use verification::{ProfileRole, VerificationRepository};
pub use worker::WorkerRepository;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepoError::NotFound("row not found".into()),
            other => RepoError::Database(other.to_string()),
        }
    }
}

impl From<RepoError> for crate::utils::AppError {
    fn from(err: RepoError) -> Self {
        use crate::utils::AppError;
        match err {
            RepoError::NotFound(msg) => AppError::not_found("NOT_FOUND", msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Repository result type
pub type RepoResult<T> = Result<T, RepoError>;
