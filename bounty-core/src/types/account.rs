//! Account types for the bounty ledger

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::crew::CrewId;

/// Account ID - primary identifier for every user balance
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account status
///
/// A jailed or suspended account keeps its balances but realizes no
/// new lifetime gain while restricted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Active,
    Jailed,
    Suspended,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Jailed => "jailed",
            Self::Suspended => "suspended",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "jailed" => Some(Self::Jailed),
            "suspended" => Some(Self::Suspended),
            _ => None,
        }
    }

    /// Restricted accounts realize no new lifetime gain
    pub fn is_restricted(&self) -> bool {
        !matches!(self, Self::Active)
    }
}

impl Default for AccountStatus {
    fn default() -> Self {
        Self::Active
    }
}

/// Plain-data view of one account, as returned by the ledger.
///
/// Invariant: `balance >= 0` and `pending_balance >= 0` after every
/// committed operation, unless the caller explicitly tolerated a
/// negative balance on removal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSnapshot {
    /// Account ID
    pub account_id: AccountId,
    /// Crew this account belongs to, if any
    pub crew_id: Option<CrewId>,
    /// Spendable balance
    pub balance: i64,
    /// Funds temporarily earmarked (e.g. staked in an open game)
    pub pending_balance: i64,
    /// Lifetime gain counter placing the account on the tax curve
    pub total_gained: i64,
    /// Lifetime gain counter as if no deduction had ever applied
    pub total_gained_unmodified: i64,
    /// Account status
    pub status: AccountStatus,
    /// Administrative tax exemption (100% deduction)
    pub admin: bool,
    /// Ability-derived tax reduction percentage, if any
    pub tax_reduction_percentage: Option<u32>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            AccountStatus::Active,
            AccountStatus::Jailed,
            AccountStatus::Suspended,
        ] {
            assert_eq!(AccountStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(AccountStatus::from_str("frozen"), None);
    }

    #[test]
    fn test_restricted() {
        assert!(!AccountStatus::Active.is_restricted());
        assert!(AccountStatus::Jailed.is_restricted());
        assert!(AccountStatus::Suspended.is_restricted());
    }
}
