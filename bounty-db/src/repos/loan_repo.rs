//! Loan repository

use std::sync::Arc;

use crate::entities::LoanEntity;
use crate::error::{BountyDbError, BountyDbResult};
use crate::store::MemoryStore;

/// Loan repository
pub struct LoanRepo {
    store: Arc<MemoryStore>,
}

impl LoanRepo {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// Register a loan row (issued by the loan subsystem)
    pub fn create(&self, entity: LoanEntity) -> BountyDbResult<LoanEntity> {
        let mut loans = self.store.loans.write().unwrap();
        if loans.contains_key(&entity.loan_id) {
            return Err(BountyDbError::AlreadyExists(format!(
                "loan {}",
                entity.loan_id
            )));
        }
        loans.insert(entity.loan_id.clone(), entity.clone());
        Ok(entity)
    }

    /// Get a loan by ID
    pub fn get(&self, loan_id: &str) -> BountyDbResult<Option<LoanEntity>> {
        Ok(self.store.loans.read().unwrap().get(loan_id).cloned())
    }

    /// Expired loans with outstanding debt for an account, oldest first
    pub fn expired_for_account(&self, account_id: &str) -> BountyDbResult<Vec<LoanEntity>> {
        let loans = self.store.loans.read().unwrap();
        let mut expired: Vec<LoanEntity> = loans
            .values()
            .filter(|l| l.account_id == account_id && l.expired && l.remaining_amount > 0)
            .cloned()
            .collect();
        expired.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(expired)
    }
}
