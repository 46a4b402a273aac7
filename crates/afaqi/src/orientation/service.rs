use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info};

use super::catalog::{DirectoryFacets, DirectoryFilter, School, SchoolCatalog};
use super::matching::{
    render_report, MatchingConfig, MatchingEngine, ProfileError, SchoolMatch, StudentProfile,
};
use super::repository::{RepositoryError, ScenarioRepository};
use super::simulator::{
    self, recommend, BacNotes, Feasibility, Mention, RecommendationList, Scenario, SimulationMode,
    SCENARIO_HISTORY_CAPACITY,
};

/// Service composing the school catalog, the matcher and the scenario store.
pub struct OrientationService<R> {
    catalog: Arc<SchoolCatalog>,
    engine: Arc<MatchingEngine>,
    repository: Arc<R>,
}

static SCENARIO_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_scenario_id() -> String {
    let id = SCENARIO_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("scn-{id:06}")
}

/// Final average plus its mention.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct AverageOutcome {
    pub moyenne: f64,
    pub mention: Mention,
}

/// National grade needed for a target; `national` is `None` when inputs are missing.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct RequiredNational {
    pub national: Option<f64>,
    pub feasibility: Option<Feasibility>,
}

/// Ranked matches together with the general average they were computed from.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MatchReport<'a> {
    pub average: f64,
    pub results: Vec<SchoolMatch<'a>>,
}

impl<R> OrientationService<R>
where
    R: ScenarioRepository + 'static,
{
    pub fn new(catalog: Arc<SchoolCatalog>, repository: Arc<R>, config: MatchingConfig) -> Self {
        Self {
            catalog,
            engine: Arc::new(MatchingEngine::new(config)),
            repository,
        }
    }

    pub fn catalog(&self) -> &SchoolCatalog {
        &self.catalog
    }

    /// Validate a submitted profile and rank the catalog for it.
    pub fn matches(
        &self,
        profile: &StudentProfile,
    ) -> Result<MatchReport<'_>, OrientationServiceError> {
        profile.validate()?;
        let results = self.engine.rank(profile, self.catalog.schools());
        info!(
            bac_type = profile.bac_type.label(),
            results = results.len(),
            "computed school matches"
        );
        Ok(MatchReport {
            average: profile.average_grade(),
            results,
        })
    }

    /// Plain-text report for the profile's matches.
    pub fn report(
        &self,
        profile: &StudentProfile,
        generated_on: NaiveDate,
    ) -> Result<String, OrientationServiceError> {
        let report = self.matches(profile)?;
        Ok(render_report(profile, &report.results, generated_on))
    }

    pub fn average(
        &self,
        regional: f64,
        controle_continue: f64,
        national: f64,
    ) -> Result<AverageOutcome, OrientationServiceError> {
        let notes = BacNotes {
            regional: Some(regional),
            controle_continue: Some(controle_continue),
            national: Some(national),
            moyenne: None,
        };
        if !notes.is_valid() {
            return Err(OrientationServiceError::InvalidNotes);
        }

        let moyenne = simulator::compute_average(regional, controle_continue, national);
        Ok(AverageOutcome {
            moyenne,
            mention: Mention::from_average(moyenne),
        })
    }

    pub fn required_national(
        &self,
        target: f64,
        regional: Option<f64>,
        controle_continue: Option<f64>,
    ) -> Result<RequiredNational, OrientationServiceError> {
        let notes = BacNotes {
            regional,
            controle_continue,
            national: None,
            moyenne: Some(target),
        };
        if !notes.is_valid() {
            return Err(OrientationServiceError::InvalidNotes);
        }

        let national = simulator::solve_required_national(target, regional, controle_continue);
        Ok(RequiredNational {
            national,
            feasibility: national.map(Feasibility::of),
        })
    }

    pub fn recommendations(
        &self,
        target: Option<f64>,
        limit: usize,
    ) -> Result<RecommendationList<'_>, OrientationServiceError> {
        if !BacNotes::is_valid_note(target) {
            return Err(OrientationServiceError::InvalidNotes);
        }
        Ok(recommend(target, self.catalog.schools(), limit))
    }

    pub fn directory(&self, filter: &DirectoryFilter) -> Vec<&School> {
        let schools = filter.apply(self.catalog.schools());
        debug!(returned = schools.len(), "filtered school directory");
        schools
    }

    pub fn facets(&self) -> DirectoryFacets {
        DirectoryFacets::collect(self.catalog.schools())
    }

    /// Resolve the notes for `mode` and store the run; fails when no result can be derived.
    pub fn save_scenario(
        &self,
        notes: BacNotes,
        mode: SimulationMode,
    ) -> Result<Scenario, OrientationServiceError> {
        if !notes.is_valid() {
            return Err(OrientationServiceError::InvalidNotes);
        }

        let resolved = notes.resolve(mode);
        let scenario = Scenario::from_notes(next_scenario_id(), Utc::now(), resolved, mode)
            .ok_or(OrientationServiceError::MissingResult)?;
        let stored = self.repository.record(scenario)?;
        info!(scenario_id = %stored.id, result = stored.result, "saved simulator scenario");
        Ok(stored)
    }

    pub fn recent_scenarios(&self) -> Result<Vec<Scenario>, OrientationServiceError> {
        Ok(self.repository.recent(SCENARIO_HISTORY_CAPACITY)?)
    }
}

/// Error raised by the orientation service.
#[derive(Debug, thiserror::Error)]
pub enum OrientationServiceError {
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error("notes must be between 0 and 20")]
    InvalidNotes,
    #[error("scenario has no result to save")]
    MissingResult,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
