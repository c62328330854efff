//! Repository Module
//!
//! Data access for the points ledger and reward catalog. All
//! functions take a `&SqlitePool` and use runtime-bound queries.

pub mod ledger;
pub mod reward;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    /// A non-positive amount was requested; rejected before any mutation
    #[error("Amount must be positive, got {0}")]
    InvalidAmount(i64),

    /// A debit would drive the balance negative; expected business
    /// outcome, detected inside the atomic update, no partial state
    #[error("Insufficient balance: have {balance}, need {required}")]
    InsufficientBalance { balance: i64, required: i64 },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// The durable store could not be reached or the update could not
    /// be committed. Nothing was mutated; safe to retry.
    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
