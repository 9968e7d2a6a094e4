//! Logging conventions for the bounty ledger
//!
//! All modules use `tracing` with structured fields. Conventions:
//!
//! | Level | Usage | Examples |
//! |-------|-------|----------|
//! | ERROR | Invariant violations that abort the call | Balance would go negative |
//! | WARN  | Soft anomalies, logged but tolerated | Pending balance below zero |
//! | INFO  | Significant committed state changes | Tax event recorded |
//! | DEBUG | Operation flow | Breakdown slices, garnish plan |
//!
//! Always use structured fields for key information: `account_id`,
//! `amount`, `balance`, `event_id`, `operation`.

use serde::{Deserialize, Serialize};

/// Soft anomaly taxonomy.
///
/// Anomalies are logged with full context and never abort the
/// enclosing unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    /// Pending balance dipped below zero; pending accounting is
    /// best-effort
    PendingBelowZero,
    /// Balance went negative while the caller explicitly tolerated it
    ToleratedNegativeBalance,
}

impl AnomalyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingBelowZero => "pending_below_zero",
            Self::ToleratedNegativeBalance => "tolerated_negative_balance",
        }
    }
}

impl std::fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Standard log field names
pub mod fields {
    /// Account identifier
    pub const ACCOUNT_ID: &str = "account_id";
    /// Crew identifier
    pub const CREW_ID: &str = "crew_id";
    /// Loan identifier
    pub const LOAN_ID: &str = "loan_id";
    /// Tax event identifier
    pub const EVENT_ID: &str = "event_id";
    /// Transaction amount
    pub const AMOUNT: &str = "amount";
    /// Resulting balance
    pub const BALANCE: &str = "balance";
    /// Operation name
    pub const OPERATION: &str = "operation";
    /// Anomaly kind
    pub const ANOMALY: &str = "anomaly";
}

/// Log operation categories for consistent naming
pub mod operations {
    pub const CREDIT: &str = "credit";
    pub const DEBIT: &str = "debit";
    pub const TAX: &str = "tax";
    pub const GARNISH: &str = "garnish";
    pub const CONTRIBUTE: &str = "contribute";
    pub const CONTEST_SCORE: &str = "contest_score";
    pub const OUTBOX_DRAIN: &str = "outbox_drain";
    pub const COMMIT: &str = "commit";
}
