//! Durable outbox rows for post-commit domain events
//!
//! The contest contribution hook is decoupled from the transaction
//! boundary: the commit writes an outbox row and a worker drains it
//! later, so a lost in-process task can never drop the contribution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;

/// Domain event emitted when an account is credited with a
/// contest-classified gain. Carries the valuation inputs; the worker
/// computes the contribution value at drain time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceCreditedEvent {
    pub account_id: String,
    /// Crew of the credited account
    pub crew_id: String,
    /// Contest the crew was participating in at credit time
    pub contest_id: String,
    /// Contest classification kind (fight, plunder, game)
    pub classification_kind: String,
    /// Net new gain realized by the credit
    pub net_new_amount: i64,
    /// Opponent supplied by the caller, if any
    pub opponent_account_id: Option<String>,
}

/// Outbox row status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutboxStatus {
    Pending,
    Processed,
}

/// Outbox row, written in the same commit as the balance mutation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboxEntity {
    /// Row ID (format: bounty_outbox:{event_id})
    pub id: String,
    pub event_id: String,
    pub status: OutboxStatus,
    pub payload: BalanceCreditedEvent,
    pub created_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
}

impl Entity for OutboxEntity {
    const TABLE: &'static str = "bounty_outbox";

    fn id(&self) -> &str {
        &self.id
    }
}

impl OutboxEntity {
    pub fn new(event_id: impl Into<String>, payload: BalanceCreditedEvent) -> Self {
        let event_id = event_id.into();
        Self {
            id: format!("{}:{}", Self::TABLE, event_id),
            event_id,
            status: OutboxStatus::Pending,
            payload,
            created_at: Utc::now(),
            processed_at: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == OutboxStatus::Pending
    }

    pub fn mark_processed(&mut self) {
        self.status = OutboxStatus::Processed;
        self.processed_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outbox_lifecycle() {
        let mut row = OutboxEntity::new(
            "ev-1",
            BalanceCreditedEvent {
                account_id: "user-1".to_string(),
                crew_id: "crew-1".to_string(),
                contest_id: "contest-1".to_string(),
                classification_kind: "fight".to_string(),
                net_new_amount: 100,
                opponent_account_id: None,
            },
        );
        assert!(row.is_pending());
        row.mark_processed();
        assert!(!row.is_pending());
        assert!(row.processed_at.is_some());
    }
}
