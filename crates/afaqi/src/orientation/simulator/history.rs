use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BacNotes, SimulationMode};

pub const SCENARIO_HISTORY_CAPACITY: usize = 10;

/// A saved simulator run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub recorded_at: DateTime<Utc>,
    pub inputs: BacNotes,
    pub result: f64,
    pub kind: SimulationMode,
}

impl Scenario {
    /// `None` when the notes carry no result to save.
    pub fn from_notes(
        id: impl Into<String>,
        recorded_at: DateTime<Utc>,
        inputs: BacNotes,
        kind: SimulationMode,
    ) -> Option<Self> {
        let result = inputs.moyenne?;
        Some(Self {
            id: id.into(),
            recorded_at,
            inputs,
            result,
            kind,
        })
    }
}

/// Bounded, newest-first list of scenarios.
#[derive(Debug, Clone)]
pub struct ScenarioHistory {
    capacity: usize,
    entries: VecDeque<Scenario>,
}

impl Default for ScenarioHistory {
    fn default() -> Self {
        Self::with_capacity(SCENARIO_HISTORY_CAPACITY)
    }
}

impl ScenarioHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, scenario: Scenario) {
        self.entries.push_front(scenario);
        self.entries.truncate(self.capacity);
    }

    pub fn recent(&self, limit: usize) -> Vec<Scenario> {
        self.entries.iter().take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
