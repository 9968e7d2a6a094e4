//! In-memory datastore and unit of work
//!
//! `MemoryStore` is the single source of truth behind the repository
//! seam; a SQL backend slots in behind the same interfaces. All
//! mutation flows through `UnitOfWork`: re-read fresh at the start,
//! stage changes, then commit all-or-nothing with a per-account
//! version check, so a concurrent writer surfaces as a conflict
//! instead of a lost update.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;

use crate::entities::{
    AccountEntity, ContestEntity, CrewEntity, LoanEntity, OutboxEntity, TaxEventEntity,
};
use crate::error::{BountyDbError, BountyDbResult};

/// In-memory table set
#[derive(Default)]
pub struct MemoryStore {
    pub(crate) accounts: RwLock<HashMap<String, AccountEntity>>,
    pub(crate) tax_events: RwLock<HashMap<String, TaxEventEntity>>,
    /// classification key -> event_id, backing at-most-once audit
    pub(crate) tax_event_index: RwLock<HashMap<String, String>>,
    pub(crate) loans: RwLock<HashMap<String, LoanEntity>>,
    pub(crate) crews: RwLock<HashMap<String, CrewEntity>>,
    pub(crate) contests: RwLock<HashMap<String, ContestEntity>>,
    pub(crate) outbox: RwLock<Vec<OutboxEntity>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a unit of work against this store
    pub fn begin(self: &Arc<Self>) -> UnitOfWork {
        UnitOfWork::new(Arc::clone(self))
    }
}

/// Scoped read-stage-commit transaction.
///
/// Reads go to the store and are overlaid with staged writes, so a
/// transaction observes its own mutations. Dropping the unit of work
/// discards everything; only `commit` publishes.
pub struct UnitOfWork {
    store: Arc<MemoryStore>,
    /// Account versions observed at first read, checked at commit
    read_versions: HashMap<String, u64>,
    staged_accounts: HashMap<String, AccountEntity>,
    staged_loans: HashMap<String, LoanEntity>,
    /// Chest deposits applied as increments at commit
    staged_chest_deposits: HashMap<String, i64>,
    staged_contests: HashMap<String, ContestEntity>,
    staged_tax_events: Vec<TaxEventEntity>,
    staged_outbox: Vec<OutboxEntity>,
    processed_outbox: Vec<String>,
}

impl UnitOfWork {
    fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            store,
            read_versions: HashMap::new(),
            staged_accounts: HashMap::new(),
            staged_loans: HashMap::new(),
            staged_chest_deposits: HashMap::new(),
            staged_contests: HashMap::new(),
            staged_tax_events: Vec::new(),
            staged_outbox: Vec::new(),
            processed_outbox: Vec::new(),
        }
    }

    /// Fetch an account, always reading the current stored state on
    /// first access (never a caller-supplied stale copy)
    pub fn fetch_account(&mut self, account_id: &str) -> BountyDbResult<AccountEntity> {
        if let Some(staged) = self.staged_accounts.get(account_id) {
            return Ok(staged.clone());
        }
        let accounts = self.store.accounts.read().unwrap();
        let entity = accounts
            .get(account_id)
            .cloned()
            .ok_or_else(|| BountyDbError::NotFound(format!("account {}", account_id)))?;
        self.read_versions
            .entry(account_id.to_string())
            .or_insert(entity.version);
        Ok(entity)
    }

    pub fn stage_account(&mut self, entity: AccountEntity) {
        self.staged_accounts.insert(entity.account_id.clone(), entity);
    }

    /// Expired loans for an account with outstanding debt, oldest
    /// first, with staged repayments overlaid
    pub fn expired_loans(&self, account_id: &str) -> Vec<LoanEntity> {
        let loans = self.store.loans.read().unwrap();
        let mut expired: Vec<LoanEntity> = loans
            .values()
            .filter(|loan| loan.account_id == account_id && loan.expired)
            .map(|loan| {
                self.staged_loans
                    .get(&loan.loan_id)
                    .cloned()
                    .unwrap_or_else(|| loan.clone())
            })
            .filter(|loan| loan.remaining_amount > 0)
            .collect();
        expired.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        expired
    }

    pub fn stage_loan(&mut self, entity: LoanEntity) {
        self.staged_loans.insert(entity.loan_id.clone(), entity);
    }

    pub fn crew(&self, crew_id: &str) -> Option<CrewEntity> {
        let mut crew = self.store.crews.read().unwrap().get(crew_id).cloned()?;
        if let Some(amount) = self.staged_chest_deposits.get(crew_id) {
            crew.deposit(*amount);
        }
        Some(crew)
    }

    /// Stage a chest deposit. Deposits are commutative increments, not
    /// row replacements, so concurrent depositors into the same crew
    /// never overwrite each other's contribution.
    pub fn deposit_into_chest(&mut self, crew_id: &str, amount: i64) {
        *self
            .staged_chest_deposits
            .entry(crew_id.to_string())
            .or_insert(0) += amount.max(0);
    }

    pub fn contest(&self, contest_id: &str) -> Option<ContestEntity> {
        if let Some(staged) = self.staged_contests.get(contest_id) {
            return Some(staged.clone());
        }
        self.store.contests.read().unwrap().get(contest_id).cloned()
    }

    /// The active contest the crew is participating in, if any
    pub fn active_contest_for(&self, crew_id: &str) -> Option<ContestEntity> {
        if let Some(staged) = self
            .staged_contests
            .values()
            .find(|c| c.active && c.involves(crew_id))
        {
            return Some(staged.clone());
        }
        self.store
            .contests
            .read()
            .unwrap()
            .values()
            .find(|c| c.active && c.involves(crew_id))
            .cloned()
    }

    pub fn stage_contest(&mut self, entity: ContestEntity) {
        self.staged_contests.insert(entity.contest_id.clone(), entity);
    }

    /// Whether a tax event already exists for the classification key
    pub fn has_tax_event(&self, classification_key: &str) -> bool {
        if self
            .staged_tax_events
            .iter()
            .any(|e| e.classification_key().as_deref() == Some(classification_key))
        {
            return true;
        }
        self.store
            .tax_event_index
            .read()
            .unwrap()
            .contains_key(classification_key)
    }

    pub fn push_tax_event(&mut self, entity: TaxEventEntity) {
        self.staged_tax_events.push(entity);
    }

    pub fn push_outbox(&mut self, entity: OutboxEntity) {
        self.staged_outbox.push(entity);
    }

    /// Mark an existing outbox row processed at commit
    pub fn mark_outbox_processed(&mut self, event_id: &str) {
        self.processed_outbox.push(event_id.to_string());
    }

    /// Publish all staged writes atomically.
    ///
    /// Every staged account's stored version must still match the
    /// version observed at read time; otherwise nothing is written and
    /// the caller receives a conflict.
    pub fn commit(self) -> BountyDbResult<()> {
        // Fixed lock order keeps concurrent commits deadlock-free
        let mut accounts = self.store.accounts.write().unwrap();
        let mut loans = self.store.loans.write().unwrap();
        let mut crews = self.store.crews.write().unwrap();
        let mut contests = self.store.contests.write().unwrap();
        let mut tax_events = self.store.tax_events.write().unwrap();
        let mut tax_event_index = self.store.tax_event_index.write().unwrap();
        let mut outbox = self.store.outbox.write().unwrap();

        // Validate before any write
        for (account_id, staged) in &self.staged_accounts {
            let observed = self.read_versions.get(account_id).copied().ok_or_else(|| {
                BountyDbError::Storage(format!(
                    "account {} staged without a prior read",
                    staged.account_id
                ))
            })?;
            let current = accounts
                .get(account_id)
                .map(|a| a.version)
                .ok_or_else(|| BountyDbError::NotFound(format!("account {}", account_id)))?;
            if current != observed {
                return Err(BountyDbError::Conflict(format!(
                    "account {} modified concurrently (version {} -> {})",
                    account_id, observed, current
                )));
            }
        }

        let now = Utc::now();
        for (account_id, mut staged) in self.staged_accounts {
            staged.version += 1;
            staged.updated_at = now;
            accounts.insert(account_id, staged);
        }
        for (loan_id, staged) in self.staged_loans {
            loans.insert(loan_id, staged);
        }
        for (crew_id, amount) in self.staged_chest_deposits {
            if let Some(crew) = crews.get_mut(&crew_id) {
                crew.deposit(amount);
            }
        }
        for (contest_id, staged) in self.staged_contests {
            contests.insert(contest_id, staged);
        }
        for event in self.staged_tax_events {
            if let Some(key) = event.classification_key() {
                // At-most-once per classification key
                if tax_event_index.contains_key(&key) {
                    continue;
                }
                tax_event_index.insert(key, event.event_id.clone());
            }
            tax_events.insert(event.event_id.clone(), event);
        }
        for row in self.staged_outbox {
            outbox.push(row);
        }
        for event_id in self.processed_outbox {
            if let Some(row) = outbox.iter_mut().find(|r| r.event_id == event_id) {
                row.mark_processed();
            }
        }

        Ok(())
    }
}
