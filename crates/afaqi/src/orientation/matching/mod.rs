//! Weighted school matcher.
//!
//! Six independent criteria (bac track, field, city, entry threshold, sector,
//! admission mode) add up to a 0–100 compatibility score per school. Schools at
//! or below the score floor are dropped, the rest are ranked and truncated.

pub mod profile;
pub mod report;
mod rules;

pub use profile::{
    AdmissionConstraints, BacType, BudgetRange, ConcoursPreference, ProfileError,
    SectorPreference, StudentProfile, SubjectGrades, MAX_PREFERRED_CITIES,
};
pub use report::{render_report, report_file_name};
pub use rules::{MatchCriterion, FLEXIBLE_GRADE_WEIGHT};

use crate::orientation::catalog::School;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Schools must score strictly above this to be recommended.
pub const DEFAULT_SCORE_FLOOR: u8 = 30;
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Post-processing dials applied after scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub score_floor: u8,
    pub max_results: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            score_floor: DEFAULT_SCORE_FLOOR,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

/// Discrete contribution to a match score, kept for transparent explanations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub criterion: MatchCriterion,
    pub points: u8,
    pub reason: String,
}

/// A recommended school with its score and the reasons behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchoolMatch<'a> {
    pub school: &'a School,
    pub score: u8,
    pub reasons: Vec<String>,
    pub components: Vec<ScoreComponent>,
}

/// Stateless matcher; safe to share between requests.
#[derive(Debug, Clone, Default)]
pub struct MatchingEngine {
    config: MatchingConfig,
}

impl MatchingEngine {
    pub fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> MatchingConfig {
        self.config
    }

    /// Score a single school without filtering.
    pub fn score<'a>(&self, profile: &StudentProfile, school: &'a School) -> SchoolMatch<'a> {
        let (components, score) = rules::score_school(profile, school);
        let reasons = components
            .iter()
            .map(|component| component.reason.clone())
            .collect();

        SchoolMatch {
            school,
            score,
            reasons,
            components,
        }
    }

    /// Score every school, keep those above the floor, best first.
    pub fn rank<'a>(&self, profile: &StudentProfile, catalog: &'a [School]) -> Vec<SchoolMatch<'a>> {
        let mut matches: Vec<SchoolMatch<'a>> = catalog
            .iter()
            .map(|school| self.score(profile, school))
            .filter(|candidate| candidate.score > self.config.score_floor)
            .collect();
        let candidates = matches.len();

        // stable: equal scores keep catalog order
        matches.sort_by(|a, b| b.score.cmp(&a.score));
        matches.truncate(self.config.max_results);

        debug!(
            bac_type = profile.bac_type.label(),
            scored = catalog.len(),
            candidates,
            returned = matches.len(),
            "ranked school matches"
        );

        matches
    }
}

/// Rank `catalog` for `profile` with the default floor (30) and limit (5).
pub fn compute_matches<'a>(profile: &StudentProfile, catalog: &'a [School]) -> Vec<SchoolMatch<'a>> {
    MatchingEngine::default().rank(profile, catalog)
}
