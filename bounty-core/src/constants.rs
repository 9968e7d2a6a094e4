//! Economy constants
//!
//! Centralized constants for the bounty economy. All default
//! percentages and the deployed bracket table live here.
//!
//! # Categories
//!
//! - **Percentages**: Default revenue-sharing and garnishment rates
//! - **Brackets**: The deployed progressive tax curve
//! - **Contest**: Contest contribution valuation

use crate::types::TaxBracket;

// ============================================================================
// Percentages
// ============================================================================

/// Maximum percentage value for any rate in the economy
pub const MAX_PERCENTAGE: u32 = 100;

/// Share of each new gain diverted to expired loans, per loan
pub const DEFAULT_GARNISH_PERCENTAGE: u32 = 50;

/// Share of collected tax routed to the owning crew's chest
pub const DEFAULT_CREW_CHEST_PERCENTAGE: u32 = 10;

// ============================================================================
// Contest valuation
// ============================================================================

/// Divisor applied to a net gain when valuing a contest contribution
/// without a confirmed opposing-side opponent
pub const CONTEST_VALUATION_DIVISOR: i64 = 2;

// ============================================================================
// Tax brackets
// ============================================================================

/// The deployed 12-bracket progressive tax curve.
///
/// Bracket `i` taxes the slice of lifetime gains between its threshold
/// and the next bracket's threshold; the last bracket is unbounded.
pub const DEFAULT_TAX_BRACKETS: [(i64, u32); 12] = [
    (0, 0),
    (100_000_000, 1),
    (500_000_000, 2),
    (1_000_000_000, 5),
    (5_000_000_000, 10),
    (10_000_000_000, 15),
    (50_000_000_000, 20),
    (100_000_000_000, 25),
    (500_000_000_000, 30),
    (1_000_000_000_000, 35),
    (5_000_000_000_000, 40),
    (10_000_000_000_000, 50),
];

/// Materialize the default bracket table
pub fn default_brackets() -> Vec<TaxBracket> {
    DEFAULT_TAX_BRACKETS
        .iter()
        .map(|&(threshold, percentage)| TaxBracket {
            threshold,
            percentage,
        })
        .collect()
}
