//! Crew and contest entities

use bounty_core::types::{ContestId, ContestSnapshot, CrewId, CrewSnapshot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Entity;

/// Crew row with the shared chest running total
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewEntity {
    /// Row ID (format: bounty_crew:{crew_id})
    pub id: String,
    pub crew_id: String,
    pub name: String,
    /// Shared chest running total
    pub chest_balance: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for CrewEntity {
    const TABLE: &'static str = "bounty_crew";

    fn id(&self) -> &str {
        &self.id
    }
}

impl CrewEntity {
    pub fn new(crew_id: impl Into<String>, name: impl Into<String>) -> Self {
        let crew_id = crew_id.into();
        let now = Utc::now();
        Self {
            id: format!("{}:{}", Self::TABLE, crew_id),
            crew_id,
            name: name.into(),
            chest_balance: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Deposit a contribution into the shared chest
    pub fn deposit(&mut self, amount: i64) {
        self.chest_balance = self.chest_balance.saturating_add(amount.max(0));
        self.updated_at = Utc::now();
    }

    pub fn to_snapshot(&self) -> CrewSnapshot {
        CrewSnapshot {
            crew_id: CrewId::new(self.crew_id.clone()),
            name: self.name.clone(),
            chest_balance: self.chest_balance,
            updated_at: self.updated_at,
        }
    }
}

/// Crew-vs-crew contest row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContestEntity {
    /// Row ID (format: bounty_contest:{contest_id})
    pub id: String,
    pub contest_id: String,
    /// Participating crews (two sides)
    pub crews: Vec<String>,
    pub active: bool,
    /// Accumulated contribution points per crew
    pub scores: HashMap<String, i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for ContestEntity {
    const TABLE: &'static str = "bounty_contest";

    fn id(&self) -> &str {
        &self.id
    }
}

impl ContestEntity {
    pub fn new(contest_id: impl Into<String>, crews: Vec<String>) -> Self {
        let contest_id = contest_id.into();
        let now = Utc::now();
        Self {
            id: format!("{}:{}", Self::TABLE, contest_id),
            contest_id,
            crews,
            active: true,
            scores: HashMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn involves(&self, crew_id: &str) -> bool {
        self.crews.iter().any(|c| c == crew_id)
    }

    /// The crew on the opposing side
    pub fn opposing(&self, crew_id: &str) -> Option<&str> {
        if !self.involves(crew_id) {
            return None;
        }
        self.crews.iter().find(|c| *c != crew_id).map(|c| c.as_str())
    }

    /// Add contribution points for a crew
    pub fn add_points(&mut self, crew_id: &str, points: i64) {
        *self.scores.entry(crew_id.to_string()).or_insert(0) += points;
        self.updated_at = Utc::now();
    }

    pub fn to_snapshot(&self) -> ContestSnapshot {
        ContestSnapshot {
            contest_id: ContestId::new(self.contest_id.clone()),
            crews: self.crews.iter().cloned().map(CrewId::new).collect(),
            active: self.active,
            scores: self
                .scores
                .iter()
                .map(|(crew, points)| (CrewId::new(crew.clone()), *points))
                .collect(),
        }
    }
}
