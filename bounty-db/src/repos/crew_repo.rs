//! Crew and contest repository

use std::sync::Arc;

use crate::entities::{ContestEntity, CrewEntity};
use crate::error::{BountyDbError, BountyDbResult};
use crate::store::MemoryStore;

/// Crew and contest repository
pub struct CrewRepo {
    store: Arc<MemoryStore>,
}

impl CrewRepo {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// Register a crew row
    pub fn create(&self, entity: CrewEntity) -> BountyDbResult<CrewEntity> {
        let mut crews = self.store.crews.write().unwrap();
        if crews.contains_key(&entity.crew_id) {
            return Err(BountyDbError::AlreadyExists(format!(
                "crew {}",
                entity.crew_id
            )));
        }
        crews.insert(entity.crew_id.clone(), entity.clone());
        Ok(entity)
    }

    /// Get a crew by ID
    pub fn get(&self, crew_id: &str) -> BountyDbResult<Option<CrewEntity>> {
        Ok(self.store.crews.read().unwrap().get(crew_id).cloned())
    }

    /// Register a contest row
    pub fn create_contest(&self, entity: ContestEntity) -> BountyDbResult<ContestEntity> {
        let mut contests = self.store.contests.write().unwrap();
        if contests.contains_key(&entity.contest_id) {
            return Err(BountyDbError::AlreadyExists(format!(
                "contest {}",
                entity.contest_id
            )));
        }
        contests.insert(entity.contest_id.clone(), entity.clone());
        Ok(entity)
    }

    /// Get a contest by ID
    pub fn get_contest(&self, contest_id: &str) -> BountyDbResult<Option<ContestEntity>> {
        Ok(self.store.contests.read().unwrap().get(contest_id).cloned())
    }

    /// The active contest a crew is participating in, if any
    pub fn active_contest_for(&self, crew_id: &str) -> BountyDbResult<Option<ContestEntity>> {
        Ok(self
            .store
            .contests
            .read()
            .unwrap()
            .values()
            .find(|c| c.active && c.involves(crew_id))
            .cloned())
    }
}
