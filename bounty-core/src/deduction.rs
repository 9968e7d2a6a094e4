//! Deduction Resolver
//!
//! Deductions are computed on demand from account attributes; they are
//! never persisted as standalone rows. Stacked deductions apply each
//! percentage to the remaining (not-yet-deducted) portion, so the
//! combined percentage can reach but never exceed 100.

use crate::types::{AccountSnapshot, Deduction, DeductionKind};

/// Resolve the deductions for one account.
///
/// An administratively exempt account short-circuits to a single 100%
/// deduction; no other deduction matters. Otherwise the ability-derived
/// reduction contributes zero or one entries.
pub fn deductions_for(account: &AccountSnapshot) -> Vec<Deduction> {
    if account.admin {
        return vec![Deduction {
            kind: DeductionKind::AdminExempt,
            percentage: 100,
        }];
    }

    let mut deductions = Vec::new();
    if let Some(percentage) = account.tax_reduction_percentage {
        if percentage > 0 {
            deductions.push(Deduction {
                kind: DeductionKind::TaxReducingAbility,
                percentage: percentage.min(100),
            });
        }
    }
    deductions
}

/// Combine stacked deductions into one percentage.
///
/// Each deduction applies to the remaining portion: 20% and 10%
/// combine to 28%, not 30%.
pub fn combined_percentage(deductions: &[Deduction]) -> u32 {
    let mut remaining: u32 = 100;
    for deduction in deductions {
        let pct = deduction.percentage.min(100);
        remaining = remaining * (100 - pct) / 100;
    }
    100 - remaining
}

/// Apply the combined deduction to a raw tax amount, floored
pub fn tax_after_deduction(raw_tax: i64, deductions: &[Deduction]) -> i64 {
    if raw_tax <= 0 {
        return 0;
    }
    let combined = combined_percentage(deductions);
    raw_tax * (100 - combined.min(100)) as i64 / 100
}
