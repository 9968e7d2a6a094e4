//! Account repository

use std::sync::Arc;

use crate::entities::AccountEntity;
use crate::error::{BountyDbError, BountyDbResult};
use crate::store::MemoryStore;

/// Account repository
pub struct AccountRepo {
    store: Arc<MemoryStore>,
}

impl AccountRepo {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// Register a new account row
    pub fn create(&self, entity: AccountEntity) -> BountyDbResult<AccountEntity> {
        let mut accounts = self.store.accounts.write().unwrap();
        if accounts.contains_key(&entity.account_id) {
            return Err(BountyDbError::AlreadyExists(format!(
                "account {}",
                entity.account_id
            )));
        }
        accounts.insert(entity.account_id.clone(), entity.clone());
        Ok(entity)
    }

    /// Get an account by ID
    pub fn get(&self, account_id: &str) -> BountyDbResult<Option<AccountEntity>> {
        Ok(self.store.accounts.read().unwrap().get(account_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_get() {
        let repo = AccountRepo::new(Arc::new(MemoryStore::new()));
        repo.create(AccountEntity::new("user-1")).unwrap();
        assert!(repo.get("user-1").unwrap().is_some());
        assert!(repo.get("user-2").unwrap().is_none());

        let err = repo.create(AccountEntity::new("user-1")).unwrap_err();
        assert!(matches!(err, BountyDbError::AlreadyExists(_)));
    }
}
