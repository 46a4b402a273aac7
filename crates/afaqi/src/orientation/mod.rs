//! Post-bac orientation: school catalog, weighted matcher, grade simulator and
//! the HTTP surface composing them.
//!
//! Everything below `catalog`, `matching` and `simulator` is pure and synchronous.
//! The service adds the only mutable state, the saved simulator scenarios.

pub mod catalog;
pub mod matching;
pub mod repository;
pub mod router;
pub mod service;
pub mod simulator;

#[cfg(test)]
mod tests;

pub use catalog::{
    AdmissionType, CatalogError, DirectoryFacets, DirectoryFilter, EntryThreshold, School,
    SchoolCatalog, SchoolContact, SchoolStats, GRADE_SCALE_MAX,
};
pub use matching::{
    compute_matches, render_report, report_file_name, BacType, MatchCriterion, MatchingConfig,
    MatchingEngine, ProfileError, SchoolMatch, ScoreComponent, StudentProfile, SubjectGrades,
};
pub use repository::{RepositoryError, ScenarioRepository};
pub use router::orientation_router;
pub use service::{
    AverageOutcome, MatchReport, OrientationService, OrientationServiceError, RequiredNational,
};
pub use simulator::{
    compute_average, eligible_schools, recommend, solve_required_national, BacNotes,
    Feasibility, MatchStrength, Mention, Recommendation, RecommendationList, Scenario,
    ScenarioHistory, SimulationMode,
};
