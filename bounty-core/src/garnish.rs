//! Loan Garnishment planner
//!
//! Pure allocation logic: decides how much of a fresh gain each
//! expired loan receives, oldest loan first. The actual repayment
//! mutation is owned by the loan collaborator.

use crate::types::{LoanId, LoanSnapshot};

/// One planned repayment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GarnishAllocation {
    pub loan_id: LoanId,
    pub amount: i64,
}

/// Plan garnishments for a list of expired loans, oldest first.
///
/// Each loan receives `percentage` percent of the remaining pool,
/// capped at the loan's outstanding amount, until either the loan list
/// or the pool is exhausted.
pub fn plan_garnishments(
    loans: &[LoanSnapshot],
    available_amount: i64,
    percentage: u32,
) -> Vec<GarnishAllocation> {
    let mut allocations = Vec::new();
    let mut pool = available_amount.max(0);
    let percentage = percentage.min(100) as i64;

    for loan in loans {
        if pool == 0 {
            break;
        }
        if !loan.expired || loan.remaining_amount <= 0 {
            continue;
        }

        let share = (pool * percentage / 100)
            .min(loan.remaining_amount)
            .min(pool);
        if share <= 0 {
            continue;
        }

        allocations.push(GarnishAllocation {
            loan_id: loan.loan_id.clone(),
            amount: share,
        });
        pool -= share;
    }

    allocations
}

/// Total amount across a garnishment plan
pub fn planned_total(allocations: &[GarnishAllocation]) -> i64 {
    allocations.iter().map(|a| a.amount).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AccountId;
    use chrono::{Duration, Utc};

    fn loan(id: &str, remaining: i64, expired: bool, age_days: i64) -> LoanSnapshot {
        LoanSnapshot {
            loan_id: LoanId::new(id),
            account_id: AccountId::new("acc-1"),
            remaining_amount: remaining,
            expired,
            created_at: Utc::now() - Duration::days(age_days),
        }
    }

    #[test]
    fn test_oldest_first_full_consumption() {
        // Two expired loans, full garnish rate, 120 available:
        // the older loan is cleared in full, the newer gets the rest.
        let loans = vec![loan("loan-1", 100, true, 10), loan("loan-2", 50, true, 5)];
        let allocations = plan_garnishments(&loans, 120, 100);

        assert_eq!(allocations.len(), 2);
        assert_eq!(allocations[0].loan_id, LoanId::new("loan-1"));
        assert_eq!(allocations[0].amount, 100);
        assert_eq!(allocations[1].loan_id, LoanId::new("loan-2"));
        assert_eq!(allocations[1].amount, 20);
        assert_eq!(planned_total(&allocations), 120);
    }

    #[test]
    fn test_percentage_of_remaining_pool() {
        let loans = vec![
            loan("loan-1", 1_000, true, 10),
            loan("loan-2", 1_000, true, 5),
        ];
        let allocations = plan_garnishments(&loans, 100, 50);

        // 50% of 100, then 50% of the remaining 50
        assert_eq!(allocations[0].amount, 50);
        assert_eq!(allocations[1].amount, 25);
    }

    #[test]
    fn test_skips_unexpired_and_settled_loans() {
        let loans = vec![
            loan("loan-1", 100, false, 10),
            loan("loan-2", 0, true, 5),
            loan("loan-3", 40, true, 1),
        ];
        let allocations = plan_garnishments(&loans, 200, 100);

        assert_eq!(allocations.len(), 1);
        assert_eq!(allocations[0].loan_id, LoanId::new("loan-3"));
        assert_eq!(allocations[0].amount, 40);
    }

    #[test]
    fn test_empty_pool_or_loans() {
        assert!(plan_garnishments(&[], 100, 50).is_empty());
        let loans = vec![loan("loan-1", 100, true, 10)];
        assert!(plan_garnishments(&loans, 0, 50).is_empty());
        assert!(plan_garnishments(&loans, -10, 50).is_empty());
    }
}
