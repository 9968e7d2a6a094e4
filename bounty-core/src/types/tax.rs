//! Taxation records: brackets, breakdowns, deductions, audit events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::account::AccountId;

/// One tier of the progressive tax curve.
///
/// The percentage applies to the slice of lifetime gains between this
/// bracket's threshold and the next bracket's threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Lifetime-gain threshold at which this bracket starts
    pub threshold: i64,
    /// Percentage applied to gains within this bracket
    pub percentage: u32,
}

/// One bracket slice of a taxed transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdownEntry {
    /// Amount taxed within this bracket
    pub taxable_amount: i64,
    /// Bracket percentage
    pub percentage: u32,
    /// Tax collected for this slice (floored)
    pub tax_amount: i64,
}

/// Source of a deduction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionKind {
    /// Administrative exemption, always 100%
    AdminExempt,
    /// Ability-derived tax reduction
    TaxReducingAbility,
}

/// A percentage deduction applied to raw tax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deduction {
    pub kind: DeductionKind,
    pub percentage: u32,
}

/// Destination of a redirected tax slice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionKind {
    /// Crew shared chest
    CrewChest,
}

/// Records that a slice of collected tax was redirected to a
/// secondary pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub kind: ContributionKind,
    /// Percentage of the tax that was redirected
    pub percentage: u32,
    /// Redirected amount
    pub amount: i64,
}

/// Classification of the game event behind a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Fight,
    Plunder,
    Game,
    Gift,
    Loan,
    Market,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fight => "fight",
            Self::Plunder => "plunder",
            Self::Game => "game",
            Self::Gift => "gift",
            Self::Loan => "loan",
            Self::Market => "market",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "fight" => Some(Self::Fight),
            "plunder" => Some(Self::Plunder),
            "game" => Some(Self::Game),
            "gift" => Some(Self::Gift),
            "loan" => Some(Self::Loan),
            "market" => Some(Self::Market),
            _ => None,
        }
    }

    /// Contest classifications count toward crew-vs-crew scoring
    pub fn is_contest(&self) -> bool {
        matches!(self, Self::Fight | Self::Plunder | Self::Game)
    }
}

/// External event classification attached to a taxed transaction.
///
/// Kind and external id are supplied together or not at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventClassification {
    pub kind: EventKind,
    pub external_event_id: String,
}

/// Immutable audit record for one taxed transaction.
///
/// Created at most once per `(classification, external_event_id)`;
/// never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxEvent {
    /// Unique event ID
    pub event_id: String,
    /// Taxed account
    pub account_id: AccountId,
    /// External event classification, if supplied by the caller
    pub classification: Option<EventClassification>,
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

impl TaxEvent {
    /// Total raw tax across the breakdown, before deductions
    pub fn raw_tax(&self) -> i64 {
        self.breakdown.iter().map(|entry| entry.tax_amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_round_trip() {
        for kind in [
            EventKind::Fight,
            EventKind::Plunder,
            EventKind::Game,
            EventKind::Gift,
            EventKind::Loan,
            EventKind::Market,
        ] {
            assert_eq!(EventKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(EventKind::from_str("duel"), None);
    }

    #[test]
    fn test_contest_kinds() {
        assert!(EventKind::Fight.is_contest());
        assert!(EventKind::Plunder.is_contest());
        assert!(EventKind::Game.is_contest());
        assert!(!EventKind::Gift.is_contest());
        assert!(!EventKind::Loan.is_contest());
        assert!(!EventKind::Market.is_contest());
    }
}
