//! Tax Event Audit Log
//!
//! Append-only audit records, written at most once per
//! `(classification, external_event_id)` pair.

use std::sync::atomic::{AtomicU64, Ordering};

use bounty_core::error::LedgerResult;
use bounty_core::types::TaxEvent;
use chrono::Utc;
use tracing::debug;

use crate::entities::TaxEventEntity;
use crate::store::UnitOfWork;

/// Audit log collaborator injected into the transaction processor
pub trait TaxAudit: Send + Sync {
    /// Stage an audit record for the event.
    ///
    /// Returns the recorded event, or `None` when an event for the
    /// same classification pair already exists (retried call).
    fn record(&self, uow: &mut UnitOfWork, event: TaxEvent) -> LedgerResult<Option<TaxEvent>>;

    /// Generate a unique event id
    fn next_event_id(&self) -> String;
}

/// Tax audit service
pub struct TaxAuditService {
    sequence: AtomicU64,
}

impl TaxAuditService {
    pub fn new() -> Self {
        Self {
            sequence: AtomicU64::new(0),
        }
    }
}

impl Default for TaxAuditService {
    fn default() -> Self {
        Self::new()
    }
}

impl TaxAudit for TaxAuditService {
    fn record(&self, uow: &mut UnitOfWork, event: TaxEvent) -> LedgerResult<Option<TaxEvent>> {
        let entity = TaxEventEntity::from_event(&event);
        if let Some(key) = entity.classification_key() {
            if uow.has_tax_event(&key) {
                debug!(
                    event_id = %event.event_id,
                    classification_key = %key,
                    "tax event already recorded, skipping"
                );
                return Ok(None);
            }
        }
        debug!(
            event_id = %event.event_id,
            account_id = %event.account_id,
            raw_tax = event.raw_tax(),
            "recording tax event"
        );
        uow.push_tax_event(entity);
        Ok(Some(event))
    }

    fn next_event_id(&self) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        let timestamp = Utc::now().timestamp_micros();
        format!("taxev_{:016x}_{:08x}", timestamp, seq)
    }
}
