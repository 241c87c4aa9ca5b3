pub mod company_service;
pub mod job_service;
pub mod user_service;

pub use company_service::CompanyService;
pub use job_service::JobService;
pub use user_service::UserService;

use thiserror::Error;

use crate::auth::password::PasswordError;
use crate::filter::QueryError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("{0}")]
    InvalidReference(String),

    #[error("Invalid username/password")]
    InvalidCredentials,

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Postgres SQLSTATE for a unique constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

/// Postgres SQLSTATE for a foreign key violation.
const FOREIGN_KEY_VIOLATION: &str = "23503";

fn sqlstate(err: &sqlx::Error) -> Option<String> {
    err.as_database_error()
        .and_then(|db| db.code())
        .map(|code| code.into_owned())
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    sqlstate(err).as_deref() == Some(UNIQUE_VIOLATION)
}

pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    sqlstate(err).as_deref() == Some(FOREIGN_KEY_VIOLATION)
}

/// Emit generated SQL at debug level when query logging is enabled.
pub(crate) fn log_query(enabled: bool, sql: &str, params: &[serde_json::Value]) {
    if enabled {
        tracing::debug!(sql = %sql, params = ?params, "executing query");
    }
}
