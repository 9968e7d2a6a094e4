//! Ledger Transaction Processor
//!
//! The single choke-point every balance mutation passes through.
//! One `apply` call executes inside one unit of work that re-reads the
//! account's current state, runs tax, deduction, audit, garnishment
//! and crew contribution in a fixed order, and commits all-or-nothing
//! with a version check on the account row.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bounty_core::config::EconomyConfig;
use bounty_core::deduction::{combined_percentage, deductions_for, tax_after_deduction};
use bounty_core::error::{LedgerError, LedgerResult};
use bounty_core::garnish::planned_total;
use bounty_core::ledger::{ApplyOptions, BalanceDirection, BountyLedger, Ledger, QueryOptions};
use bounty_core::logging::AnomalyKind;
use bounty_core::types::{
    AccountId, AccountSnapshot, CrewId, EventClassification, TaxEvent,
};
use chrono::Utc;
use tracing::{debug, error, warn};

use crate::entities::{AccountEntity, BalanceCreditedEvent, OutboxEntity};
use crate::repos::{AccountRepo, CrewRepo, TaxEventRepo};
use crate::services::{CrewChest, CrewChestService, LoanBook, LoanService, TaxAudit, TaxAuditService};
use crate::store::{MemoryStore, UnitOfWork};

/// Ledger transaction processor
pub struct LedgerService {
    store: Arc<MemoryStore>,
    audit: Arc<dyn TaxAudit>,
    chest: Arc<dyn CrewChest>,
    loans: Arc<dyn LoanBook>,
    config: EconomyConfig,
    outbox_sequence: AtomicU64,
}

impl LedgerService {
    /// Create a processor with injected collaborators
    pub fn new(
        store: Arc<MemoryStore>,
        audit: Arc<dyn TaxAudit>,
        chest: Arc<dyn CrewChest>,
        loans: Arc<dyn LoanBook>,
        config: EconomyConfig,
    ) -> Self {
        Self {
            store,
            audit,
            chest,
            loans,
            config,
            outbox_sequence: AtomicU64::new(0),
        }
    }

    /// Create a processor with the standard collaborators
    pub fn with_defaults(store: Arc<MemoryStore>, config: EconomyConfig) -> Self {
        Self::new(
            store,
            Arc::new(TaxAuditService::new()),
            Arc::new(CrewChestService::new()),
            Arc::new(LoanService::new()),
            config,
        )
    }

    fn next_outbox_id(&self) -> String {
        let seq = self.outbox_sequence.fetch_add(1, Ordering::SeqCst);
        let timestamp = Utc::now().timestamp_micros();
        format!("credit_{:016x}_{:08x}", timestamp, seq)
    }

    /// Apply a mutation inside a caller-held unit of work.
    ///
    /// Lets a caller batch several mutations into one commit; the
    /// caller owns committing or dropping the unit of work.
    pub fn apply_with(
        &self,
        uow: &mut UnitOfWork,
        account_id: &AccountId,
        amount: i64,
        direction: BalanceDirection,
        options: &ApplyOptions,
    ) -> LedgerResult<AccountSnapshot> {
        options.validate(amount)?;

        let mut account = uow
            .fetch_account(account_id.as_str())
            .map_err(LedgerError::from)?;
        let pending_portion = options.effective_pending_portion(amount);

        match direction {
            BalanceDirection::Remove => {
                self.apply_removal(&mut account, amount, pending_portion, options)?
            }
            BalanceDirection::Add => {
                self.apply_addition(uow, &mut account, amount, pending_portion, options)?
            }
        }

        uow.stage_account(account.clone());
        Ok(account.to_snapshot())
    }

    /// REMOVE path: debit the balance, optionally earmarking a pending
    /// portion, and guard the non-negative invariant
    fn apply_removal(
        &self,
        account: &mut AccountEntity,
        amount: i64,
        pending_portion: i64,
        options: &ApplyOptions,
    ) -> LedgerResult<()> {
        account.balance -= amount;
        if pending_portion > 0 {
            account.pending_balance += pending_portion;
        }

        if account.balance < 0 {
            if !options.tolerates_negative_balance {
                let context = options
                    .context
                    .clone()
                    .unwrap_or_else(|| format!("removal of {}", amount));
                error!(
                    account_id = %account.account_id,
                    amount,
                    balance = account.balance,
                    context = %context,
                    "removal would drive balance negative"
                );
                return Err(LedgerError::IntegrityViolation {
                    account_id: account.account_id.clone(),
                    balance: account.balance,
                    context,
                });
            }
            warn!(
                account_id = %account.account_id,
                amount,
                balance = account.balance,
                anomaly = %AnomalyKind::ToleratedNegativeBalance,
                "balance went negative with caller tolerance"
            );
        }

        debug!(
            account_id = %account.account_id,
            amount,
            balance = account.balance,
            pending_balance = account.pending_balance,
            "debited account"
        );
        Ok(())
    }

    /// ADD path: release any pending portion, tax the net new gain,
    /// garnish expired loans, credit the remainder, and attribute
    /// contest contributions via the outbox
    fn apply_addition(
        &self,
        uow: &mut UnitOfWork,
        account: &mut AccountEntity,
        amount: i64,
        pending_portion: i64,
        options: &ApplyOptions,
    ) -> LedgerResult<()> {
        if pending_portion > 0 {
            account.pending_balance -= pending_portion;
            if account.pending_balance < 0 {
                // Pending accounting is best-effort
                warn!(
                    account_id = %account.account_id,
                    pending_balance = account.pending_balance,
                    anomaly = %AnomalyKind::PendingBelowZero,
                    "pending balance dipped below zero"
                );
            }
        }

        if account.status().is_restricted() {
            debug!(
                account_id = %account.account_id,
                status = %account.status,
                "restricted account realizes no new gain"
            );
            return Ok(());
        }

        // Money already reflected as pending is not taxed twice
        let net_new = amount - pending_portion;

        let mut raw_tax: i64 = 0;
        let mut tax: i64 = 0;
        if options.should_tax && net_new > 0 {
            let breakdown = self.config.schedule.breakdown(account.total_gained, net_new);
            raw_tax = breakdown.iter().map(|entry| entry.tax_amount).sum();

            if raw_tax > 0 {
                let deductions = deductions_for(&account.to_snapshot());
                if combined_percentage(&deductions) < 100 {
                    tax = tax_after_deduction(raw_tax, &deductions);
                    debug!(
                        account_id = %account.account_id,
                        raw_tax,
                        tax,
                        slices = breakdown.len(),
                        "taxing net gain"
                    );

                    let mut contributions = Vec::new();
                    if tax > 0 {
                        if let Some(crew_id) = account.crew_id.clone() {
                            if let Some(contribution) = self.chest.contribute(
                                uow,
                                &crew_id,
                                tax,
                                self.config.crew_chest_percentage,
                            )? {
                                contributions.push(contribution);
                            }
                        }
                    }

                    if let (Some(kind), Some(external_id)) =
                        (options.classification, options.external_event_id.as_ref())
                    {
                        let event = TaxEvent {
                            event_id: self.audit.next_event_id(),
                            account_id: AccountId::new(account.account_id.clone()),
                            classification: Some(EventClassification {
                                kind,
                                external_event_id: external_id.clone(),
                            }),
                            starting_total_gained: account.total_gained,
                            breakdown,
                            deductions,
                            contributions,
                            created_at: Utc::now(),
                        };
                        self.audit.record(uow, event)?;
                    }
                }
            }
        }

        let mut amount_to_credit = amount - tax;

        // Lifetime counters advance by the realized net gain
        account.total_gained += net_new - tax;
        account.total_gained_unmodified += net_new - raw_tax;

        if options.should_check_loans && amount_to_credit > 0 {
            let allocations = self.loans.garnish(
                uow,
                &account.account_id,
                amount_to_credit,
                self.config.garnish_percentage,
            )?;
            amount_to_credit -= planned_total(&allocations);
        }

        account.balance += amount_to_credit;
        debug!(
            account_id = %account.account_id,
            amount,
            credited = amount_to_credit,
            balance = account.balance,
            total_gained = account.total_gained,
            "credited account"
        );

        self.enqueue_contest_contribution(uow, account, net_new, options);
        Ok(())
    }

    /// Step 8: durable outbox event carrying the contest valuation
    /// inputs; the worker values and scores it after commit
    fn enqueue_contest_contribution(
        &self,
        uow: &mut UnitOfWork,
        account: &AccountEntity,
        net_new: i64,
        options: &ApplyOptions,
    ) {
        let Some(kind) = options.classification else {
            return;
        };
        if !kind.is_contest() || net_new <= 0 {
            return;
        }
        let Some(crew_id) = account.crew_id.clone() else {
            return;
        };
        let Some(contest) = uow.active_contest_for(&crew_id) else {
            return;
        };

        let event_id = self.next_outbox_id();
        debug!(
            account_id = %account.account_id,
            crew_id = %crew_id,
            contest_id = %contest.contest_id,
            event_id = %event_id,
            "enqueueing contest contribution"
        );
        uow.push_outbox(OutboxEntity::new(
            event_id,
            BalanceCreditedEvent {
                account_id: account.account_id.clone(),
                crew_id,
                contest_id: contest.contest_id,
                classification_kind: kind.as_str().to_string(),
                net_new_amount: net_new,
                opponent_account_id: options
                    .opponent_account
                    .as_ref()
                    .map(|a| a.as_str().to_string()),
            },
        ));
    }
}

#[async_trait]
impl Ledger for LedgerService {
    fn name(&self) -> &'static str {
        "bounty_ledger"
    }
}

#[async_trait]
impl BountyLedger for LedgerService {
    async fn apply(
        &self,
        account_id: &AccountId,
        amount: i64,
        direction: BalanceDirection,
        options: ApplyOptions,
    ) -> LedgerResult<AccountSnapshot> {
        let mut uow = self.store.begin();
        let snapshot = self.apply_with(&mut uow, account_id, amount, direction, &options)?;
        if options.persist {
            uow.commit().map_err(LedgerError::from)?;
        }
        Ok(snapshot)
    }

    async fn get_account(&self, account_id: &AccountId) -> LedgerResult<Option<AccountSnapshot>> {
        let entity = AccountRepo::new(Arc::clone(&self.store)).get(account_id.as_str())?;
        Ok(entity.map(|e| e.to_snapshot()))
    }

    async fn list_tax_events(
        &self,
        account_id: &AccountId,
        options: QueryOptions,
    ) -> LedgerResult<Vec<TaxEvent>> {
        let rows = TaxEventRepo::new(Arc::clone(&self.store))
            .list_for_account(account_id.as_str(), &options)?;
        Ok(rows.iter().map(|row| row.to_event()).collect())
    }

    async fn chest_balance(&self, crew_id: &CrewId) -> LedgerResult<i64> {
        let crew = CrewRepo::new(Arc::clone(&self.store))
            .get(crew_id.as_str())?
            .ok_or_else(|| LedgerError::NotFound(format!("crew {}", crew_id)))?;
        Ok(crew.chest_balance)
    }
}
