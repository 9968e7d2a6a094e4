//! Tax event entity - append-only audit rows

use bounty_core::types::{
    AccountId, Contribution, Deduction, EventClassification, EventKind, TaxBreakdownEntry, TaxEvent,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;

/// Tax event row, written at most once per taxed transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxEventEntity {
    /// Row ID (format: bounty_tax_event:{event_id})
    pub id: String,
    /// Unique event ID
    pub event_id: String,
    /// Taxed account
    pub account_id: String,
    /// External event classification kind, paired with the external id
    pub classification_kind: Option<String>,
    /// External event id, paired with the kind
    pub external_event_id: Option<String>,
    /// Lifetime-gain counter at the time of the event
    pub starting_total_gained: i64,
    /// Per-bracket breakdown
    pub breakdown: Vec<TaxBreakdownEntry>,
    /// Deductions applied to the raw tax
    pub deductions: Vec<Deduction>,
    /// Tax slices redirected to secondary pools
    pub contributions: Vec<Contribution>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Entity for TaxEventEntity {
    const TABLE: &'static str = "bounty_tax_event";

    fn id(&self) -> &str {
        &self.id
    }
}

impl TaxEventEntity {
    /// Build a row from the domain event
    pub fn from_event(event: &TaxEvent) -> Self {
        Self {
            id: format!("{}:{}", Self::TABLE, event.event_id),
            event_id: event.event_id.clone(),
            account_id: event.account_id.as_str().to_string(),
            classification_kind: event
                .classification
                .as_ref()
                .map(|c| c.kind.as_str().to_string()),
            external_event_id: event
                .classification
                .as_ref()
                .map(|c| c.external_event_id.clone()),
            starting_total_gained: event.starting_total_gained,
            breakdown: event.breakdown.clone(),
            deductions: event.deductions.clone(),
            contributions: event.contributions.clone(),
            created_at: event.created_at,
        }
    }

    /// Dedup key for at-most-once audit, when classified
    pub fn classification_key(&self) -> Option<String> {
        match (&self.classification_kind, &self.external_event_id) {
            (Some(kind), Some(external_id)) => Some(format!("{}:{}", kind, external_id)),
            _ => None,
        }
    }

    /// Convert back to the domain event
    pub fn to_event(&self) -> TaxEvent {
        let classification = match (&self.classification_kind, &self.external_event_id) {
            (Some(kind), Some(external_id)) => {
                EventKind::from_str(kind).map(|kind| EventClassification {
                    kind,
                    external_event_id: external_id.clone(),
                })
            }
            _ => None,
        };
        TaxEvent {
            event_id: self.event_id.clone(),
            account_id: AccountId::new(self.account_id.clone()),
            classification,
            starting_total_gained: self.starting_total_gained,
            breakdown: self.breakdown.clone(),
            deductions: self.deductions.clone(),
            contributions: self.contributions.clone(),
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event() -> TaxEvent {
        TaxEvent {
            event_id: "taxev_1".to_string(),
            account_id: AccountId::new("user-1"),
            classification: Some(EventClassification {
                kind: EventKind::Fight,
                external_event_id: "fight-42".to_string(),
            }),
            starting_total_gained: 900,
            breakdown: vec![TaxBreakdownEntry {
                taxable_amount: 100,
                percentage: 5,
                tax_amount: 5,
            }],
            deductions: vec![],
            contributions: vec![],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_round_trip() {
        let entity = TaxEventEntity::from_event(&event());
        assert_eq!(entity.id, "bounty_tax_event:taxev_1");
        assert_eq!(
            entity.classification_key(),
            Some("fight:fight-42".to_string())
        );

        let back = entity.to_event();
        assert_eq!(back.event_id, "taxev_1");
        assert_eq!(
            back.classification.unwrap().kind,
            EventKind::Fight
        );
        assert_eq!(back.breakdown.len(), 1);
    }

    #[test]
    fn test_unclassified_event_has_no_key() {
        let mut event = event();
        event.classification = None;
        let entity = TaxEventEntity::from_event(&event);
        assert_eq!(entity.classification_key(), None);
        assert!(entity.to_event().classification.is_none());
    }
}
