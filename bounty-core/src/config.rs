//! Economy configuration
//!
//! Loaded once at startup; the bracket table and sharing percentages
//! are immutable afterwards.

use crate::constants::{
    default_brackets, DEFAULT_CREW_CHEST_PERCENTAGE, DEFAULT_GARNISH_PERCENTAGE, MAX_PERCENTAGE,
};
use crate::error::{LedgerError, LedgerResult};
use crate::tax::TaxSchedule;
use crate::types::TaxBracket;

/// Configuration consumed by the ledger transaction processor
#[derive(Debug, Clone)]
pub struct EconomyConfig {
    /// Ordered progressive tax bracket table
    pub schedule: TaxSchedule,
    /// Share of each new gain diverted to expired loans, per loan
    pub garnish_percentage: u32,
    /// Share of collected tax routed to the owning crew's chest
    pub crew_chest_percentage: u32,
}

impl EconomyConfig {
    /// Build a validated configuration
    pub fn new(
        brackets: Vec<TaxBracket>,
        garnish_percentage: u32,
        crew_chest_percentage: u32,
    ) -> LedgerResult<Self> {
        if garnish_percentage > MAX_PERCENTAGE {
            return Err(LedgerError::InvalidArgument(format!(
                "garnish percentage {} exceeds {}",
                garnish_percentage, MAX_PERCENTAGE
            )));
        }
        if crew_chest_percentage > MAX_PERCENTAGE {
            return Err(LedgerError::InvalidArgument(format!(
                "crew chest percentage {} exceeds {}",
                crew_chest_percentage, MAX_PERCENTAGE
            )));
        }
        Ok(Self {
            schedule: TaxSchedule::new(brackets)?,
            garnish_percentage,
            crew_chest_percentage,
        })
    }
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            schedule: TaxSchedule::new(default_brackets()).expect("default brackets are valid"),
            garnish_percentage: DEFAULT_GARNISH_PERCENTAGE,
            crew_chest_percentage: DEFAULT_CREW_CHEST_PERCENTAGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EconomyConfig::default();
        assert_eq!(config.schedule.brackets().len(), 12);
        assert!(config.garnish_percentage <= 100);
        assert!(config.crew_chest_percentage <= 100);
    }

    #[test]
    fn test_rejects_out_of_range_percentages() {
        assert!(EconomyConfig::new(default_brackets(), 101, 10).is_err());
        assert!(EconomyConfig::new(default_brackets(), 50, 101).is_err());
        assert!(EconomyConfig::new(vec![], 50, 10).is_err());
    }
}
