//! Account entity - one row per user

use bounty_core::types::{AccountId, AccountSnapshot, AccountStatus, CrewId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;

/// Account row.
///
/// `version` increments on every committed write and backs the
/// compare-and-swap check in the unit of work, so concurrent writers
/// conflict instead of losing updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountEntity {
    /// Row ID (format: bounty_account:{account_id})
    pub id: String,
    /// Account ID (unique per user)
    pub account_id: String,
    /// Crew membership, if any
    pub crew_id: Option<String>,
    /// Spendable balance
    pub balance: i64,
    /// Funds temporarily earmarked
    pub pending_balance: i64,
    /// Lifetime gain counter on the tax curve
    pub total_gained: i64,
    /// Lifetime gain counter as if no deduction had applied
    pub total_gained_unmodified: i64,
    /// Status: active, jailed, suspended
    pub status: String,
    /// Administrative tax exemption
    pub admin: bool,
    /// Ability-derived tax reduction percentage
    pub tax_reduction_percentage: Option<u32>,
    /// Optimistic concurrency version
    pub version: u64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Entity for AccountEntity {
    const TABLE: &'static str = "bounty_account";

    fn id(&self) -> &str {
        &self.id
    }
}

impl AccountEntity {
    /// Create a fresh account row at registration
    pub fn new(account_id: impl Into<String>) -> Self {
        let account_id = account_id.into();
        let now = Utc::now();
        Self {
            id: format!("{}:{}", Self::TABLE, account_id),
            account_id,
            crew_id: None,
            balance: 0,
            pending_balance: 0,
            total_gained: 0,
            total_gained_unmodified: 0,
            status: AccountStatus::Active.as_str().to_string(),
            admin: false,
            tax_reduction_percentage: None,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Account status, defaulting to active on an unknown value
    pub fn status(&self) -> AccountStatus {
        AccountStatus::from_str(&self.status).unwrap_or_default()
    }

    /// Convert to the plain-data snapshot exposed by the ledger
    pub fn to_snapshot(&self) -> AccountSnapshot {
        AccountSnapshot {
            account_id: AccountId::new(self.account_id.clone()),
            crew_id: self.crew_id.clone().map(CrewId::new),
            balance: self.balance,
            pending_balance: self.pending_balance,
            total_gained: self.total_gained,
            total_gained_unmodified: self.total_gained_unmodified,
            status: self.status(),
            admin: self.admin,
            tax_reduction_percentage: self.tax_reduction_percentage,
            updated_at: self.updated_at,
        }
    }
}
