use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::orientation::catalog::{EntryThreshold, School};

/// Cards shown before the "and N more" hint.
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 10;

/// A school is open to `target` when any of its published bars is cleared.
///
/// Unlike the matcher, the student's own track is not consulted: a per-track
/// school qualifies as soon as one of its tracks admits the target average.
pub fn clears_threshold(threshold: &EntryThreshold, target: f64) -> bool {
    match threshold {
        EntryThreshold::Unrestricted => true,
        EntryThreshold::Flat(value) => target >= *value,
        EntryThreshold::PerTrack(values) => values.values().any(|value| target >= *value),
    }
}

/// Sort key for eligible schools: the hardest bar, 0 when there is none.
fn sort_key(threshold: &EntryThreshold) -> f64 {
    threshold.highest().unwrap_or(0.0)
}

/// Schools open to `target`, most selective first. Ties keep catalog order.
pub fn eligible_schools(target: f64, catalog: &[School]) -> Vec<&School> {
    let mut eligible: Vec<&School> = catalog
        .iter()
        .filter(|school| clears_threshold(&school.entry_threshold, target))
        .collect();
    eligible.sort_by(|a, b| {
        sort_key(&b.entry_threshold)
            .partial_cmp(&sort_key(&a.entry_threshold))
            .unwrap_or(Ordering::Equal)
    });
    eligible
}

/// How comfortably a target average clears a school's lowest bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrength {
    Excellent,
    Good,
    Moderate,
    Borderline,
}

impl MatchStrength {
    pub fn from_margin(margin: f64) -> Self {
        if margin >= 3.0 {
            MatchStrength::Excellent
        } else if margin >= 1.5 {
            MatchStrength::Good
        } else if margin >= 0.5 {
            MatchStrength::Moderate
        } else {
            MatchStrength::Borderline
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            MatchStrength::Excellent => "Excellente correspondance",
            MatchStrength::Good => "Bonne correspondance",
            MatchStrength::Moderate => "Correspondance modérée",
            MatchStrength::Borderline => "Correspondance limite",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation<'a> {
    pub school: &'a School,
    /// Lowest published bar; 0 for schools without one.
    pub threshold: f64,
    pub margin: f64,
    pub strength: MatchStrength,
}

impl<'a> Recommendation<'a> {
    pub fn new(school: &'a School, target: f64) -> Self {
        let threshold = school.entry_threshold.lowest().unwrap_or(0.0);
        let margin = target - threshold;
        Self {
            school,
            threshold,
            margin,
            strength: MatchStrength::from_margin(margin),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecommendationList<'a> {
    pub total: usize,
    pub shown: Vec<Recommendation<'a>>,
    pub remaining: usize,
}

/// Recommendation cards for a target average.
///
/// A missing or zero target means nothing was entered yet and yields an empty list.
pub fn recommend(target: Option<f64>, catalog: &[School], limit: usize) -> RecommendationList<'_> {
    let Some(target) = target.filter(|value| *value != 0.0) else {
        return RecommendationList::default();
    };

    let eligible = eligible_schools(target, catalog);
    let total = eligible.len();
    let shown: Vec<Recommendation<'_>> = eligible
        .into_iter()
        .take(limit)
        .map(|school| Recommendation::new(school, target))
        .collect();
    let remaining = total - shown.len();

    debug!(target, total, shown = shown.len(), "built school recommendations");

    RecommendationList {
        total,
        shown,
        remaining,
    }
}
