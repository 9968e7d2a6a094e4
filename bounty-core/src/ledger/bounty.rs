//! Bounty Ledger - the public balance mutation contract

use async_trait::async_trait;

use super::{Ledger, QueryOptions};
use crate::error::{LedgerError, LedgerResult};
use crate::types::{AccountId, AccountSnapshot, CrewId, EventKind, TaxEvent};

/// Direction of a balance mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceDirection {
    Add,
    Remove,
}

/// Options for one `apply` call.
///
/// Defaults: taxed, loan-checked, persisted, no pending movement, no
/// classification, negative balances rejected.
#[derive(Debug, Clone)]
pub struct ApplyOptions {
    /// Move funds through the pending bucket
    pub affects_pending_balance: bool,
    /// Pending portion when it differs from the full amount
    pub pending_portion: Option<i64>,
    /// External event classification; must be paired with
    /// `external_event_id`
    pub classification: Option<EventKind>,
    /// External event id; must be paired with `classification`
    pub external_event_id: Option<String>,
    /// Apply progressive taxation to the realized gain
    pub should_tax: bool,
    /// Garnish expired loans before crediting
    pub should_check_loans: bool,
    /// Tolerate (and log) a negative balance on removal
    pub tolerates_negative_balance: bool,
    /// Opponent account, used only to value a contest contribution
    pub opponent_account: Option<AccountId>,
    /// Commit the mutation immediately
    pub persist: bool,
    /// Caller-supplied trace carried into integrity-violation errors
    /// and logs
    pub context: Option<String>,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            affects_pending_balance: false,
            pending_portion: None,
            classification: None,
            external_event_id: None,
            should_tax: true,
            should_check_loans: true,
            tolerates_negative_balance: false,
            opponent_account: None,
            persist: true,
            context: None,
        }
    }
}

impl ApplyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move funds through the pending bucket; `portion` overrides the
    /// pending share when it is smaller than the full amount
    pub fn with_pending(mut self, portion: Option<i64>) -> Self {
        self.affects_pending_balance = true;
        self.pending_portion = portion;
        self
    }

    /// Attach the external event classification pair
    pub fn with_classification(mut self, kind: EventKind, external_event_id: impl Into<String>) -> Self {
        self.classification = Some(kind);
        self.external_event_id = Some(external_event_id.into());
        self
    }

    /// Skip taxation for this call
    pub fn untaxed(mut self) -> Self {
        self.should_tax = false;
        self
    }

    /// Skip loan garnishment for this call
    pub fn without_loan_check(mut self) -> Self {
        self.should_check_loans = false;
        self
    }

    /// Allow the balance to go negative on removal (logged either way)
    pub fn tolerating_negative_balance(mut self) -> Self {
        self.tolerates_negative_balance = true;
        self
    }

    /// Supply the opponent for contest contribution valuation
    pub fn with_opponent(mut self, opponent: AccountId) -> Self {
        self.opponent_account = Some(opponent);
        self
    }

    /// Compute without committing; the caller batches the commit
    pub fn deferred(mut self) -> Self {
        self.persist = false;
        self
    }

    /// Attach a caller trace for integrity-violation reporting
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// The portion of the amount flowing through the pending bucket
    pub fn effective_pending_portion(&self, amount: i64) -> i64 {
        if self.affects_pending_balance {
            self.pending_portion.unwrap_or(amount)
        } else {
            0
        }
    }

    /// Validate the options against the supplied amount.
    ///
    /// Runs before any state is read or written.
    pub fn validate(&self, amount: i64) -> LedgerResult<()> {
        if amount < 0 {
            return Err(LedgerError::InvalidArgument(format!(
                "amount must not be negative, got {}",
                amount
            )));
        }
        if amount == 0 && self.pending_portion.is_none() {
            return Err(LedgerError::InvalidArgument(
                "neither an amount nor a pending portion was supplied".to_string(),
            ));
        }
        if self.classification.is_some() != self.external_event_id.is_some() {
            return Err(LedgerError::InvalidArgument(
                "classification and external event id must be supplied together".to_string(),
            ));
        }
        if self.pending_portion.is_some() && !self.affects_pending_balance {
            return Err(LedgerError::InvalidArgument(
                "pending portion supplied without pending balance movement".to_string(),
            ));
        }
        if let Some(portion) = self.pending_portion {
            if portion < 0 || portion > amount {
                return Err(LedgerError::InvalidArgument(format!(
                    "pending portion {} outside 0..={}",
                    portion, amount
                )));
            }
        }
        Ok(())
    }
}

/// Bounty Ledger trait - the only entry point for balance mutations
#[async_trait]
pub trait BountyLedger: Ledger {
    /// Apply one balance mutation.
    ///
    /// The whole call executes inside one unit of work that re-reads
    /// the account's current state at the start; it either commits
    /// fully or leaves no persisted trace. With `persist` disabled the
    /// mutated snapshot is returned without committing.
    async fn apply(
        &self,
        account_id: &AccountId,
        amount: i64,
        direction: BalanceDirection,
        options: ApplyOptions,
    ) -> LedgerResult<AccountSnapshot>;

    /// Fetch one account snapshot
    async fn get_account(&self, account_id: &AccountId) -> LedgerResult<Option<AccountSnapshot>>;

    /// List tax events for an account, newest first by default
    async fn list_tax_events(
        &self,
        account_id: &AccountId,
        options: QueryOptions,
    ) -> LedgerResult<Vec<TaxEvent>>;

    /// Current crew chest balance
    async fn chest_balance(&self, crew_id: &CrewId) -> LedgerResult<i64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ApplyOptions::default();
        assert!(options.should_tax);
        assert!(options.should_check_loans);
        assert!(options.persist);
        assert!(!options.affects_pending_balance);
        assert!(!options.tolerates_negative_balance);
    }

    #[test]
    fn test_rejects_negative_amount() {
        assert!(ApplyOptions::new().validate(-1).is_err());
    }

    #[test]
    fn test_rejects_missing_amount_and_pending_portion() {
        assert!(ApplyOptions::new().validate(0).is_err());
        // Zero amount is fine when a pending portion is supplied
        assert!(ApplyOptions::new().with_pending(Some(0)).validate(0).is_ok());
    }

    #[test]
    fn test_rejects_unpaired_classification() {
        let mut options = ApplyOptions::new();
        options.classification = Some(EventKind::Fight);
        assert!(options.validate(10).is_err());

        let mut options = ApplyOptions::new();
        options.external_event_id = Some("fight-1".to_string());
        assert!(options.validate(10).is_err());

        let options = ApplyOptions::new().with_classification(EventKind::Fight, "fight-1");
        assert!(options.validate(10).is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_pending_portion() {
        assert!(ApplyOptions::new()
            .with_pending(Some(11))
            .validate(10)
            .is_err());
        assert!(ApplyOptions::new()
            .with_pending(Some(-1))
            .validate(10)
            .is_err());
        assert!(ApplyOptions::new()
            .with_pending(Some(5))
            .validate(10)
            .is_ok());
    }

    #[test]
    fn test_effective_pending_portion() {
        assert_eq!(ApplyOptions::new().effective_pending_portion(100), 0);
        assert_eq!(
            ApplyOptions::new()
                .with_pending(None)
                .effective_pending_portion(100),
            100
        );
        assert_eq!(
            ApplyOptions::new()
                .with_pending(Some(40))
                .effective_pending_portion(100),
            40
        );
    }
}
