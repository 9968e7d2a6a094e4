//! Loan entity as stored for garnishment

use bounty_core::types::{AccountId, LoanId, LoanSnapshot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;

/// Loan row. The ledger only repays; issuing and expiry transitions
/// are owned by the loan subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanEntity {
    /// Row ID (format: bounty_loan:{loan_id})
    pub id: String,
    pub loan_id: String,
    /// Borrower account
    pub account_id: String,
    /// Outstanding amount still owed
    pub remaining_amount: i64,
    /// Expired loans are subject to garnishment
    pub expired: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for LoanEntity {
    const TABLE: &'static str = "bounty_loan";

    fn id(&self) -> &str {
        &self.id
    }
}

impl LoanEntity {
    pub fn new(
        loan_id: impl Into<String>,
        account_id: impl Into<String>,
        remaining_amount: i64,
        expired: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        let loan_id = loan_id.into();
        Self {
            id: format!("{}:{}", Self::TABLE, loan_id),
            loan_id,
            account_id: account_id.into(),
            remaining_amount,
            expired,
            created_at,
            updated_at: created_at,
        }
    }

    /// Apply a repayment, clamping the outstanding amount at zero
    pub fn apply_repayment(&mut self, amount: i64) {
        self.remaining_amount = (self.remaining_amount - amount.max(0)).max(0);
        self.updated_at = Utc::now();
    }

    pub fn to_snapshot(&self) -> LoanSnapshot {
        LoanSnapshot {
            loan_id: LoanId::new(self.loan_id.clone()),
            account_id: AccountId::new(self.account_id.clone()),
            remaining_amount: self.remaining_amount,
            expired: self.expired,
            created_at: self.created_at,
        }
    }
}
