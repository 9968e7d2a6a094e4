//! Crew and contest types as seen by the ledger

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Crew ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CrewId(pub String);

impl CrewId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CrewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Contest ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContestId(pub String);

impl ContestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Plain-data view of one crew
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewSnapshot {
    pub crew_id: CrewId,
    pub name: String,
    /// Shared chest running total
    pub chest_balance: i64,
    pub updated_at: DateTime<Utc>,
}

/// Plain-data view of one crew-vs-crew contest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContestSnapshot {
    pub contest_id: ContestId,
    /// Participating crews (two sides)
    pub crews: Vec<CrewId>,
    pub active: bool,
    /// Accumulated contribution points per crew
    pub scores: HashMap<CrewId, i64>,
}

impl ContestSnapshot {
    /// Whether the crew participates in this contest
    pub fn involves(&self, crew_id: &CrewId) -> bool {
        self.crews.iter().any(|c| c == crew_id)
    }

    /// The crew on the opposing side, if the contest has exactly two
    pub fn opposing(&self, crew_id: &CrewId) -> Option<&CrewId> {
        if !self.involves(crew_id) {
            return None;
        }
        self.crews.iter().find(|c| *c != crew_id)
    }
}
