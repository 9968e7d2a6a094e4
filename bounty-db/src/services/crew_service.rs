//! Crew Chest Contribution Distributor
//!
//! Routes a configured percentage of collected tax into the owning
//! crew's shared chest. The deposit is staged into the caller's unit
//! of work, so it commits with the balance mutation.

use bounty_core::error::LedgerResult;
use bounty_core::types::{Contribution, ContributionKind};
use tracing::{debug, warn};

use crate::store::UnitOfWork;

/// Crew chest collaborator injected into the transaction processor
pub trait CrewChest: Send + Sync {
    /// Route `percentage` percent of `tax_amount` to the crew chest.
    ///
    /// Returns the contribution record for audit attachment, or `None`
    /// when the computed slice is zero.
    fn contribute(
        &self,
        uow: &mut UnitOfWork,
        crew_id: &str,
        tax_amount: i64,
        percentage: u32,
    ) -> LedgerResult<Option<Contribution>>;
}

/// Crew chest service
pub struct CrewChestService;

impl CrewChestService {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CrewChestService {
    fn default() -> Self {
        Self::new()
    }
}

impl CrewChest for CrewChestService {
    fn contribute(
        &self,
        uow: &mut UnitOfWork,
        crew_id: &str,
        tax_amount: i64,
        percentage: u32,
    ) -> LedgerResult<Option<Contribution>> {
        let amount = tax_amount.max(0) * percentage.min(100) as i64 / 100;
        if amount <= 0 {
            return Ok(None);
        }

        let Some(crew) = uow.crew(crew_id) else {
            // Membership pointing at a missing crew is a data anomaly,
            // not a reason to fail the whole transaction
            warn!(crew_id = %crew_id, "crew not found for chest contribution");
            return Ok(None);
        };

        // Deposits commit as increments so concurrent contributors
        // never overwrite each other
        uow.deposit_into_chest(crew_id, amount);
        debug!(
            crew_id = %crew_id,
            amount,
            chest_balance = crew.chest_balance + amount,
            "crew chest contribution"
        );

        Ok(Some(Contribution {
            kind: ContributionKind::CrewChest,
            percentage,
            amount,
        }))
    }
}
