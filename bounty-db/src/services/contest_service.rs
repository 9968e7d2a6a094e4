//! Contest Contribution Worker
//!
//! Drains the durable outbox and turns each balance-credited event into
//! contest points for the earner's crew. Valuing and scoring happen
//! here, after the balance commit, so a slow contest update can never
//! hold up the ledger.
//!
//! Valuation rules:
//! - default: half of the net new amount
//! - opponent from the opposing crew of the same contest: full amount
//! - opponent from the earner's own crew: zero (still processed, so
//!   the row is not retried forever)

use std::sync::Arc;

use bounty_core::constants::CONTEST_VALUATION_DIVISOR;
use bounty_core::error::{LedgerError, LedgerResult};
use tracing::{debug, warn};

use crate::entities::{BalanceCreditedEvent, OutboxEntity};
use crate::repos::{AccountRepo, OutboxRepo};
use crate::store::MemoryStore;

/// Post-commit worker scoring contest contributions from the outbox
pub struct ContestContributionWorker {
    store: Arc<MemoryStore>,
}

impl ContestContributionWorker {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// Process every pending outbox row, one commit per row.
    ///
    /// Returns the number of rows processed. The processed marker is
    /// flipped in the same commit as the score update, so a crash
    /// between rows re-delivers only unprocessed events.
    pub fn drain(&self) -> LedgerResult<usize> {
        let pending = OutboxRepo::new(Arc::clone(&self.store))
            .pending()
            .map_err(LedgerError::from)?;
        let mut drained = 0;
        for row in pending {
            self.process(&row)?;
            drained += 1;
        }
        if drained > 0 {
            debug!(drained, "drained contest contribution outbox");
        }
        Ok(drained)
    }

    fn process(&self, row: &OutboxEntity) -> LedgerResult<()> {
        let event = &row.payload;
        let valuation = self.valuation(event)?;

        let mut uow = self.store.begin();
        if valuation > 0 {
            match uow.contest(&event.contest_id) {
                Some(mut contest) if contest.active && contest.involves(&event.crew_id) => {
                    contest.add_points(&event.crew_id, valuation);
                    debug!(
                        event_id = %row.event_id,
                        contest_id = %event.contest_id,
                        crew_id = %event.crew_id,
                        valuation,
                        "scored contest contribution"
                    );
                    uow.stage_contest(contest);
                }
                _ => {
                    // Contest ended or vanished between credit and
                    // drain; the contribution lapses
                    warn!(
                        event_id = %row.event_id,
                        contest_id = %event.contest_id,
                        "contest no longer scorable, dropping contribution"
                    );
                }
            }
        }
        uow.mark_outbox_processed(&row.event_id);
        uow.commit().map_err(LedgerError::from)
    }

    /// Value the contribution from the event's opponent context
    fn valuation(&self, event: &BalanceCreditedEvent) -> LedgerResult<i64> {
        let default = event.net_new_amount / CONTEST_VALUATION_DIVISOR;
        let Some(opponent_id) = event.opponent_account_id.as_deref() else {
            return Ok(default);
        };
        let Some(opponent) = AccountRepo::new(Arc::clone(&self.store))
            .get(opponent_id)
            .map_err(LedgerError::from)?
        else {
            return Ok(default);
        };
        let Some(opponent_crew) = opponent.crew_id else {
            return Ok(default);
        };

        // Gains farmed off a crewmate score nothing
        if opponent_crew == event.crew_id {
            return Ok(0);
        }

        if let Some(contest) = self.store.contests.read().unwrap().get(&event.contest_id) {
            if contest.opposing(&event.crew_id) == Some(opponent_crew.as_str()) {
                return Ok(event.net_new_amount);
            }
        }
        Ok(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{AccountEntity, ContestEntity};
    use crate::store::UnitOfWork;

    fn seeded_store() -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        {
            let mut contests = store.contests.write().unwrap();
            contests.insert(
                "contest-1".to_string(),
                ContestEntity::new("contest-1", vec!["red".to_string(), "blue".to_string()]),
            );
        }
        {
            let mut accounts = store.accounts.write().unwrap();
            let mut rival = AccountEntity::new("rival");
            rival.crew_id = Some("blue".to_string());
            accounts.insert("rival".to_string(), rival);
            let mut mate = AccountEntity::new("mate");
            mate.crew_id = Some("red".to_string());
            accounts.insert("mate".to_string(), mate);
        }
        store
    }

    fn push_event(uow: &mut UnitOfWork, event_id: &str, opponent: Option<&str>) {
        uow.push_outbox(OutboxEntity::new(
            event_id,
            BalanceCreditedEvent {
                account_id: "user-1".to_string(),
                crew_id: "red".to_string(),
                contest_id: "contest-1".to_string(),
                classification_kind: "fight".to_string(),
                net_new_amount: 100,
                opponent_account_id: opponent.map(str::to_string),
            },
        ));
    }

    #[test]
    fn test_default_valuation_is_half() {
        let store = seeded_store();
        let mut uow = store.begin();
        push_event(&mut uow, "ev-1", None);
        uow.commit().unwrap();

        let worker = ContestContributionWorker::new(Arc::clone(&store));
        assert_eq!(worker.drain().unwrap(), 1);

        let contests = store.contests.read().unwrap();
        assert_eq!(contests.get("contest-1").unwrap().scores.get("red"), Some(&50));
        drop(contests);
        assert!(!store.outbox.read().unwrap()[0].is_pending());
    }

    #[test]
    fn test_opposing_crew_opponent_scores_full() {
        let store = seeded_store();
        let mut uow = store.begin();
        push_event(&mut uow, "ev-1", Some("rival"));
        uow.commit().unwrap();

        ContestContributionWorker::new(Arc::clone(&store)).drain().unwrap();
        let contests = store.contests.read().unwrap();
        assert_eq!(contests.get("contest-1").unwrap().scores.get("red"), Some(&100));
    }

    #[test]
    fn test_same_crew_opponent_scores_zero_but_processes() {
        let store = seeded_store();
        let mut uow = store.begin();
        push_event(&mut uow, "ev-1", Some("mate"));
        uow.commit().unwrap();

        assert_eq!(ContestContributionWorker::new(Arc::clone(&store)).drain().unwrap(), 1);
        let contests = store.contests.read().unwrap();
        assert!(contests.get("contest-1").unwrap().scores.get("red").is_none());
        drop(contests);
        assert!(!store.outbox.read().unwrap()[0].is_pending());
    }

    #[test]
    fn test_inactive_contest_drops_contribution() {
        let store = seeded_store();
        store
            .contests
            .write()
            .unwrap()
            .get_mut("contest-1")
            .unwrap()
            .active = false;

        let mut uow = store.begin();
        push_event(&mut uow, "ev-1", None);
        uow.commit().unwrap();

        assert_eq!(ContestContributionWorker::new(Arc::clone(&store)).drain().unwrap(), 1);
        let contests = store.contests.read().unwrap();
        assert!(contests.get("contest-1").unwrap().scores.is_empty());
    }

    #[test]
    fn test_drain_is_idempotent() {
        let store = seeded_store();
        let mut uow = store.begin();
        push_event(&mut uow, "ev-1", None);
        uow.commit().unwrap();

        let worker = ContestContributionWorker::new(Arc::clone(&store));
        assert_eq!(worker.drain().unwrap(), 1);
        assert_eq!(worker.drain().unwrap(), 0);

        let contests = store.contests.read().unwrap();
        assert_eq!(contests.get("contest-1").unwrap().scores.get("red"), Some(&50));
    }
}
