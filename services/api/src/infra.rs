use afaqi::orientation::{
    CatalogError, MatchingConfig, OrientationService, RepositoryError, Scenario,
    ScenarioHistory, ScenarioRepository, SchoolCatalog,
};
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local scenario store; history is lost on restart.
#[derive(Default, Clone)]
pub(crate) struct InMemoryScenarioRepository {
    history: Arc<Mutex<ScenarioHistory>>,
}

impl ScenarioRepository for InMemoryScenarioRepository {
    fn record(&self, scenario: Scenario) -> Result<Scenario, RepositoryError> {
        let mut guard = self
            .history
            .lock()
            .map_err(|_| RepositoryError::Unavailable("scenario history poisoned".to_string()))?;
        guard.push(scenario.clone());
        Ok(scenario)
    }

    fn recent(&self, limit: usize) -> Result<Vec<Scenario>, RepositoryError> {
        let guard = self
            .history
            .lock()
            .map_err(|_| RepositoryError::Unavailable("scenario history poisoned".to_string()))?;
        Ok(guard.recent(limit))
    }
}

pub(crate) fn default_matching_config() -> MatchingConfig {
    MatchingConfig::default()
}

/// Catalog export at `path`, or the bundled sample when none is configured.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<SchoolCatalog, CatalogError> {
    match path {
        Some(path) => SchoolCatalog::from_path(path),
        None => SchoolCatalog::bundled(),
    }
}

pub(crate) fn build_service(
    catalog_path: Option<&Path>,
) -> Result<OrientationService<InMemoryScenarioRepository>, CatalogError> {
    let catalog = load_catalog(catalog_path)?;
    Ok(OrientationService::new(
        Arc::new(catalog),
        Arc::new(InMemoryScenarioRepository::default()),
        default_matching_config(),
    ))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
