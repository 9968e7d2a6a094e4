//! Bounty database error types

use bounty_core::error::LedgerError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BountyDbError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Entity already exists: {0}")]
    AlreadyExists(String),

    #[error("Write conflict: {0}")]
    Conflict(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type BountyDbResult<T> = Result<T, BountyDbError>;

impl From<BountyDbError> for LedgerError {
    fn from(err: BountyDbError) -> Self {
        match err {
            BountyDbError::Storage(msg) => LedgerError::Storage(msg),
            BountyDbError::NotFound(msg) => LedgerError::NotFound(msg),
            BountyDbError::AlreadyExists(msg) => LedgerError::Conflict(msg),
            BountyDbError::Conflict(msg) => LedgerError::Conflict(msg),
            BountyDbError::Serialization(err) => LedgerError::Serialization(err),
        }
    }
}
