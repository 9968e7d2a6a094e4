//! Loan types as seen by the ledger
//!
//! The ledger only reads whether a loan is expired and how much is
//! outstanding; issuing and closing loans is owned by the loan
//! subsystem.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::account::AccountId;

/// Loan ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoanId(pub String);

impl LoanId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LoanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Plain-data view of one loan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanSnapshot {
    pub loan_id: LoanId,
    /// Borrower account
    pub account_id: AccountId,
    /// Outstanding amount still owed
    pub remaining_amount: i64,
    /// Expired loans are subject to garnishment
    pub expired: bool,
    /// Issue timestamp; garnishment repays oldest loans first
    pub created_at: DateTime<Utc>,
}
