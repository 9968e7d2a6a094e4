//! Error types for the bounty ledger
//!
//! `InvalidArgument` and `IntegrityViolation` abort the enclosing unit
//! of work and surface to the caller; soft anomalies are logged only
//! (see `logging::AnomalyKind`) and never appear here.

use thiserror::Error;

/// Ledger operation errors
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Integrity violation for account {account_id}: balance would drop to {balance} ({context})")]
    IntegrityViolation {
        account_id: String,
        balance: i64,
        context: String,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
