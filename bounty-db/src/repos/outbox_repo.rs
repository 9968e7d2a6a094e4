//! Outbox repository

use std::sync::Arc;

use crate::entities::OutboxEntity;
use crate::error::BountyDbResult;
use crate::store::MemoryStore;

/// Outbox repository
pub struct OutboxRepo {
    store: Arc<MemoryStore>,
}

impl OutboxRepo {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// Pending rows in insertion order
    pub fn pending(&self) -> BountyDbResult<Vec<OutboxEntity>> {
        Ok(self
            .store
            .outbox
            .read()
            .unwrap()
            .iter()
            .filter(|row| row.is_pending())
            .cloned()
            .collect())
    }

    /// Total rows, pending or processed
    pub fn len(&self) -> BountyDbResult<usize> {
        Ok(self.store.outbox.read().unwrap().len())
    }

    pub fn is_empty(&self) -> BountyDbResult<bool> {
        Ok(self.store.outbox.read().unwrap().is_empty())
    }
}
