//! Tax event repository - append-only audit rows

use std::sync::Arc;

use bounty_core::ledger::QueryOptions;

use crate::entities::TaxEventEntity;
use crate::error::BountyDbResult;
use crate::store::MemoryStore;

/// Tax event repository
pub struct TaxEventRepo {
    store: Arc<MemoryStore>,
}

impl TaxEventRepo {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// List tax events for an account, newest first unless asked
    /// otherwise
    pub fn list_for_account(
        &self,
        account_id: &str,
        options: &QueryOptions,
    ) -> BountyDbResult<Vec<TaxEventEntity>> {
        let events = self.store.tax_events.read().unwrap();
        let mut rows: Vec<TaxEventEntity> = events
            .values()
            .filter(|e| e.account_id == account_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if options.order_desc {
            // Already newest first
        } else {
            rows.reverse();
        }
        if let Some(limit) = options.limit {
            rows.truncate(limit as usize);
        }
        Ok(rows)
    }

    /// Find the event recorded for a classification pair, if any
    pub fn find_by_classification(
        &self,
        kind: &str,
        external_event_id: &str,
    ) -> BountyDbResult<Option<TaxEventEntity>> {
        let key = format!("{}:{}", kind, external_event_id);
        let index = self.store.tax_event_index.read().unwrap();
        let Some(event_id) = index.get(&key) else {
            return Ok(None);
        };
        Ok(self.store.tax_events.read().unwrap().get(event_id).cloned())
    }

    /// Total number of stored events
    pub fn count(&self) -> BountyDbResult<usize> {
        Ok(self.store.tax_events.read().unwrap().len())
    }
}
