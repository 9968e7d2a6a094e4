//! Loan Garnishment Processor
//!
//! Applies the pure garnishment plan to the account's expired loans,
//! oldest first, staging each repayment into the caller's unit of
//! work. How much each loan receives is decided by
//! `bounty_core::garnish`; this service only executes the plan.

use bounty_core::error::LedgerResult;
use bounty_core::garnish::{plan_garnishments, GarnishAllocation};
use tracing::debug;

use crate::store::UnitOfWork;

/// Loan garnishment collaborator injected into the transaction
/// processor
pub trait LoanBook: Send + Sync {
    /// Garnish the account's expired loans from the available amount.
    ///
    /// Returns the executed allocations; their total is what the
    /// caller must withhold from the credit.
    fn garnish(
        &self,
        uow: &mut UnitOfWork,
        account_id: &str,
        available_amount: i64,
        percentage: u32,
    ) -> LedgerResult<Vec<GarnishAllocation>>;
}

/// Loan garnishment service
pub struct LoanService;

impl LoanService {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LoanService {
    fn default() -> Self {
        Self::new()
    }
}

impl LoanBook for LoanService {
    fn garnish(
        &self,
        uow: &mut UnitOfWork,
        account_id: &str,
        available_amount: i64,
        percentage: u32,
    ) -> LedgerResult<Vec<GarnishAllocation>> {
        let loans = uow.expired_loans(account_id);
        if loans.is_empty() {
            return Ok(Vec::new());
        }

        let snapshots: Vec<_> = loans.iter().map(|l| l.to_snapshot()).collect();
        let allocations = plan_garnishments(&snapshots, available_amount, percentage);

        for allocation in &allocations {
            if let Some(mut loan) = loans
                .iter()
                .find(|l| l.loan_id == allocation.loan_id.as_str())
                .cloned()
            {
                loan.apply_repayment(allocation.amount);
                debug!(
                    account_id = %account_id,
                    loan_id = %allocation.loan_id,
                    amount = allocation.amount,
                    remaining = loan.remaining_amount,
                    "garnished expired loan"
                );
                uow.stage_loan(loan);
            }
        }

        Ok(allocations)
    }
}
