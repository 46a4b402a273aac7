use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::orientation::catalog::{
    AdmissionType, EntryThreshold, School, SchoolCatalog, SchoolContact, SchoolStats,
};
use crate::orientation::matching::{
    AdmissionConstraints, BacType, MatchingConfig, StudentProfile, SubjectGrades,
};
use crate::orientation::repository::{RepositoryError, ScenarioRepository};
use crate::orientation::simulator::{Scenario, ScenarioHistory};
use crate::orientation::{orientation_router, OrientationService};

pub(super) const PHYSICS_TRACK: &str = "Sciences Physiques";
pub(super) const MATHS_TRACK: &str = "Sciences Mathématiques A";

/// Public engineering school in Rabat, open to the physics track, no concours.
pub(super) fn school(id: u32, threshold: EntryThreshold) -> School {
    School {
        id,
        name: format!("École {id}"),
        city: "Rabat".to_string(),
        institution_type: "École d'ingénieurs".to_string(),
        filiere: "Ingénierie".to_string(),
        description: "Formation d'ingénieurs généralistes".to_string(),
        bac_types: vec![PHYSICS_TRACK.to_string(), MATHS_TRACK.to_string()],
        entry_threshold: threshold,
        is_public: true,
        requires_concours: false,
        admission_type: AdmissionType::Preselection,
        specialties: vec!["Génie Civil".to_string()],
        programs: vec!["Cycle ingénieur".to_string()],
        stats: SchoolStats::default(),
        contact: SchoolContact::default(),
    }
}

pub(super) fn per_track(values: &[(&str, f64)]) -> EntryThreshold {
    let values: BTreeMap<String, f64> = values
        .iter()
        .map(|(track, value)| (track.to_string(), *value))
        .collect();
    EntryThreshold::PerTrack(values)
}

/// Physics-track student averaging 12 who wants engineering in Rabat.
pub(super) fn profile() -> StudentProfile {
    StudentProfile {
        bac_type: BacType::SciencesPhysiques,
        grades: SubjectGrades::default(),
        preferred_cities: vec!["Rabat".to_string()],
        preferred_fields: vec!["Ingénierie".to_string()],
        budget_range: Default::default(),
        constraints: AdmissionConstraints::default(),
    }
}

pub(super) fn profile_with_average(average: f64) -> StudentProfile {
    let mut profile = profile();
    profile.grades = SubjectGrades {
        math: average,
        physics: average,
        french: average,
        philosophy: average,
        speciality: average,
    };
    profile
}

pub(super) fn bundled_catalog() -> Arc<SchoolCatalog> {
    Arc::new(SchoolCatalog::bundled().expect("bundled catalog is valid"))
}

pub(super) fn build_service() -> (
    OrientationService<MemoryRepository>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let service = OrientationService::new(
        bundled_catalog(),
        repository.clone(),
        MatchingConfig::default(),
    );
    (service, repository)
}

pub(super) fn router_with_service(service: OrientationService<MemoryRepository>) -> axum::Router {
    orientation_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) history: Arc<Mutex<ScenarioHistory>>,
}

impl ScenarioRepository for MemoryRepository {
    fn record(&self, scenario: Scenario) -> Result<Scenario, RepositoryError> {
        let mut guard = self.history.lock().expect("history mutex poisoned");
        guard.push(scenario.clone());
        Ok(scenario)
    }

    fn recent(&self, limit: usize) -> Result<Vec<Scenario>, RepositoryError> {
        let guard = self.history.lock().expect("history mutex poisoned");
        Ok(guard.recent(limit))
    }
}

pub(super) struct UnavailableRepository;

impl ScenarioRepository for UnavailableRepository {
    fn record(&self, _scenario: Scenario) -> Result<Scenario, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<Scenario>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 payload")
}
