//! Bac grade simulator.
//!
//! The final bac average weighs the regional exam and the continuous assessment
//! at 25% each and the national exam at 50%. The simulator computes that
//! average, or solves for the national exam grade needed to reach a target.

pub mod eligibility;
pub mod history;

pub use eligibility::{
    eligible_schools, recommend, MatchStrength, Recommendation, RecommendationList,
    DEFAULT_RECOMMENDATION_LIMIT,
};
pub use history::{Scenario, ScenarioHistory, SCENARIO_HISTORY_CAPACITY};

use crate::orientation::catalog::GRADE_SCALE_MAX;
use serde::{Deserialize, Serialize};

pub const REGIONAL_WEIGHT: f64 = 0.25;
pub const CONTROLE_CONTINU_WEIGHT: f64 = 0.25;
pub const NATIONAL_WEIGHT: f64 = 0.5;

/// Round to two decimals, halves toward positive infinity.
pub fn round_to_hundredths(value: f64) -> f64 {
    let scaled = value * 100.0;
    let floor = scaled.floor();
    let rounded = if scaled - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded / 100.0
}

/// Final bac average from the three exam components.
pub fn compute_average(regional: f64, controle_continue: f64, national: f64) -> f64 {
    round_to_hundredths(
        regional * REGIONAL_WEIGHT
            + controle_continue * CONTROLE_CONTINU_WEIGHT
            + national * NATIONAL_WEIGHT,
    )
}

/// National exam grade needed to reach `target`.
///
/// `None` when either known component is missing. The result is not clamped:
/// above 20 means the target is out of reach, below 0 means it is already met.
pub fn solve_required_national(
    target: f64,
    regional: Option<f64>,
    controle_continue: Option<f64>,
) -> Option<f64> {
    let regional = regional?;
    let controle_continue = controle_continue?;
    let secured = regional * REGIONAL_WEIGHT + controle_continue * CONTROLE_CONTINU_WEIGHT;
    Some(round_to_hundredths((target - secured) / NATIONAL_WEIGHT))
}

/// Honours awarded for a bac average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mention {
    TresBien,
    Bien,
    AssezBien,
    Passable,
    Insuffisant,
}

impl Mention {
    pub fn from_average(average: f64) -> Self {
        if average >= 16.0 {
            Mention::TresBien
        } else if average >= 14.0 {
            Mention::Bien
        } else if average >= 12.0 {
            Mention::AssezBien
        } else if average >= 10.0 {
            Mention::Passable
        } else {
            Mention::Insuffisant
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Mention::TresBien => "Très Bien",
            Mention::Bien => "Bien",
            Mention::AssezBien => "Assez Bien",
            Mention::Passable => "Passable",
            Mention::Insuffisant => "Insuffisant",
        }
    }
}

/// Whether a required national exam grade can actually be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feasibility {
    Reachable,
    Unreachable,
}

impl Feasibility {
    pub fn of(required_national: f64) -> Self {
        if required_national <= GRADE_SCALE_MAX {
            Feasibility::Reachable
        } else {
            Feasibility::Unreachable
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Feasibility::Reachable => "Objectif atteignable",
            Feasibility::Unreachable => "Objectif impossible à atteindre avec ces notes",
        }
    }
}

/// Which way the simulator runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationMode {
    /// Exam grades in, average out.
    #[default]
    Calculate,
    /// Target average in, required national grade out.
    Reverse,
}

/// Calculator state; in reverse mode `moyenne` holds the target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BacNotes {
    #[serde(default)]
    pub regional: Option<f64>,
    #[serde(default)]
    pub controle_continue: Option<f64>,
    #[serde(default)]
    pub national: Option<f64>,
    #[serde(default)]
    pub moyenne: Option<f64>,
}

impl BacNotes {
    /// Absent notes are valid; present ones must be on the 0–20 scale.
    pub fn is_valid_note(note: Option<f64>) -> bool {
        note.map_or(true, |value| {
            value.is_finite() && (0.0..=GRADE_SCALE_MAX).contains(&value)
        })
    }

    pub fn is_valid(&self) -> bool {
        [
            self.regional,
            self.controle_continue,
            self.national,
            self.moyenne,
        ]
        .into_iter()
        .all(Self::is_valid_note)
    }

    pub fn average(&self) -> Option<f64> {
        Some(compute_average(
            self.regional?,
            self.controle_continue?,
            self.national?,
        ))
    }

    pub fn required_national(&self) -> Option<f64> {
        solve_required_national(self.moyenne?, self.regional, self.controle_continue)
    }

    /// Fill in the derived field for `mode`; leaves the notes untouched when inputs are missing.
    pub fn resolve(mut self, mode: SimulationMode) -> Self {
        match mode {
            SimulationMode::Calculate => {
                if let Some(average) = self.average() {
                    self.moyenne = Some(average);
                }
            }
            SimulationMode::Reverse => {
                if let Some(national) = self.required_national() {
                    self.national = Some(national);
                }
            }
        }
        self
    }
}
