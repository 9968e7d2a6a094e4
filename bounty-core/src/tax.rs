//! Progressive Tax Bracket Calculator
//!
//! Marginal taxation: an incoming gain is consumed in slices bounded
//! by bracket thresholds, each slice taxed at its bracket's rate.
//! Money already inside a lower bracket is never re-taxed when more
//! money arrives.

use crate::error::{LedgerError, LedgerResult};
use crate::types::{TaxBracket, TaxBreakdownEntry};

/// Ordered, immutable bracket table.
///
/// Loaded once from configuration; validated to be ascending, to start
/// at threshold zero, and to stay within 0..=100 percent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxSchedule {
    brackets: Vec<TaxBracket>,
}

impl TaxSchedule {
    /// Build a schedule from an ordered bracket table
    pub fn new(brackets: Vec<TaxBracket>) -> LedgerResult<Self> {
        if brackets.is_empty() {
            return Err(LedgerError::InvalidArgument(
                "tax schedule requires at least one bracket".to_string(),
            ));
        }
        if brackets[0].threshold != 0 {
            return Err(LedgerError::InvalidArgument(
                "first tax bracket must start at threshold 0".to_string(),
            ));
        }
        for pair in brackets.windows(2) {
            if pair[1].threshold <= pair[0].threshold {
                return Err(LedgerError::InvalidArgument(format!(
                    "tax bracket thresholds must be strictly ascending: {} then {}",
                    pair[0].threshold, pair[1].threshold
                )));
            }
        }
        if let Some(bracket) = brackets.iter().find(|b| b.percentage > 100) {
            return Err(LedgerError::InvalidArgument(format!(
                "tax bracket percentage {} exceeds 100",
                bracket.percentage
            )));
        }
        Ok(Self { brackets })
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// The highest-threshold bracket whose threshold is at or below
    /// the lifetime-gain counter
    pub fn bracket_for(&self, total_gained: i64) -> &TaxBracket {
        self.brackets
            .iter()
            .rev()
            .find(|b| b.threshold <= total_gained)
            .unwrap_or(&self.brackets[0])
    }

    /// The first bracket above the lifetime-gain counter, or the last
    /// bracket if no further escalation exists
    pub fn next_bracket_for(&self, total_gained: i64) -> &TaxBracket {
        self.brackets
            .iter()
            .find(|b| b.threshold > total_gained)
            .unwrap_or_else(|| self.brackets.last().expect("schedule is non-empty"))
    }

    /// Walk the incoming amount forward from the starting lifetime
    /// gain, slicing it at bracket thresholds.
    ///
    /// Each slice is taxed at its bracket's percentage, floored to
    /// integer units. Inside the last bracket the whole remainder is
    /// one slice.
    pub fn breakdown(
        &self,
        starting_total_gained: i64,
        incoming_amount: i64,
    ) -> Vec<TaxBreakdownEntry> {
        let mut entries = Vec::new();
        let mut position = starting_total_gained.max(0);
        let mut remaining = incoming_amount;

        while remaining > 0 {
            let bracket = self.bracket_for(position);
            let next = self.next_bracket_for(position);
            let to_next = next.threshold - position;

            let taxable_amount = if to_next > 0 {
                remaining.min(to_next)
            } else {
                remaining
            };
            let tax_amount = taxable_amount * bracket.percentage as i64 / 100;

            entries.push(TaxBreakdownEntry {
                taxable_amount,
                percentage: bracket.percentage,
                tax_amount,
            });

            position += taxable_amount;
            remaining -= taxable_amount;
        }

        entries
    }

    /// Total tax over the breakdown
    pub fn total_tax(&self, starting_total_gained: i64, incoming_amount: i64) -> i64 {
        self.breakdown(starting_total_gained, incoming_amount)
            .iter()
            .map(|entry| entry.tax_amount)
            .sum()
    }
}
