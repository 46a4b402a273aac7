use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::catalog::DirectoryFilter;
use super::matching::{report_file_name, StudentProfile};
use super::repository::{RepositoryError, ScenarioRepository};
use super::service::{OrientationService, OrientationServiceError};
use super::simulator::{BacNotes, SimulationMode, DEFAULT_RECOMMENDATION_LIMIT};

/// Router builder exposing the matcher, simulator and directory over HTTP.
pub fn orientation_router<R>(service: Arc<OrientationService<R>>) -> Router
where
    R: ScenarioRepository + 'static,
{
    Router::new()
        .route("/api/v1/matches", post(matches_handler::<R>))
        .route("/api/v1/matches/report", post(report_handler::<R>))
        .route("/api/v1/simulator/average", post(average_handler::<R>))
        .route("/api/v1/simulator/required", post(required_handler::<R>))
        .route(
            "/api/v1/simulator/scenarios",
            post(save_scenario_handler::<R>).get(recent_scenarios_handler::<R>),
        )
        .route("/api/v1/schools", get(directory_handler::<R>))
        .route("/api/v1/schools/facets", get(facets_handler::<R>))
        .route("/api/v1/schools/eligible", get(eligible_handler::<R>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct AverageRequest {
    pub(crate) regional: f64,
    pub(crate) controle_continue: f64,
    pub(crate) national: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RequiredRequest {
    pub(crate) target: f64,
    #[serde(default)]
    pub(crate) regional: Option<f64>,
    #[serde(default)]
    pub(crate) controle_continue: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScenarioRequest {
    #[serde(default)]
    pub(crate) mode: SimulationMode,
    #[serde(flatten)]
    pub(crate) notes: BacNotes,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct EligibleQuery {
    #[serde(default)]
    pub(crate) average: Option<f64>,
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

fn error_response(error: OrientationServiceError) -> Response {
    let status = match &error {
        OrientationServiceError::Profile(_)
        | OrientationServiceError::InvalidNotes
        | OrientationServiceError::MissingResult => StatusCode::UNPROCESSABLE_ENTITY,
        OrientationServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        OrientationServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn matches_handler<R>(
    State(service): State<Arc<OrientationService<R>>>,
    axum::Json(profile): axum::Json<StudentProfile>,
) -> Response
where
    R: ScenarioRepository + 'static,
{
    match service.matches(&profile) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn report_handler<R>(
    State(service): State<Arc<OrientationService<R>>>,
    axum::Json(profile): axum::Json<StudentProfile>,
) -> Response
where
    R: ScenarioRepository + 'static,
{
    let today = Utc::now().date_naive();
    match service.report(&profile, today) {
        Ok(report) => {
            let disposition = format!("attachment; filename=\"{}\"", report_file_name(today));
            let headers = [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ];
            (StatusCode::OK, headers, report).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn average_handler<R>(
    State(service): State<Arc<OrientationService<R>>>,
    axum::Json(request): axum::Json<AverageRequest>,
) -> Response
where
    R: ScenarioRepository + 'static,
{
    match service.average(request.regional, request.controle_continue, request.national) {
        Ok(outcome) => {
            let payload = json!({
                "moyenne": outcome.moyenne,
                "mention": outcome.mention.label(),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn required_handler<R>(
    State(service): State<Arc<OrientationService<R>>>,
    axum::Json(request): axum::Json<RequiredRequest>,
) -> Response
where
    R: ScenarioRepository + 'static,
{
    match service.required_national(request.target, request.regional, request.controle_continue)
    {
        Ok(required) => {
            let payload = json!({
                "national": required.national,
                "feasibility": required.feasibility,
                "message": required.feasibility.map(|feasibility| feasibility.label()),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn save_scenario_handler<R>(
    State(service): State<Arc<OrientationService<R>>>,
    axum::Json(request): axum::Json<ScenarioRequest>,
) -> Response
where
    R: ScenarioRepository + 'static,
{
    match service.save_scenario(request.notes, request.mode) {
        Ok(scenario) => (StatusCode::CREATED, axum::Json(scenario)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn recent_scenarios_handler<R>(
    State(service): State<Arc<OrientationService<R>>>,
) -> Response
where
    R: ScenarioRepository + 'static,
{
    match service.recent_scenarios() {
        Ok(scenarios) => (StatusCode::OK, axum::Json(scenarios)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn directory_handler<R>(
    State(service): State<Arc<OrientationService<R>>>,
    Query(filter): Query<DirectoryFilter>,
) -> Response
where
    R: ScenarioRepository + 'static,
{
    let schools = service.directory(&filter);
    (StatusCode::OK, axum::Json(schools)).into_response()
}

pub(crate) async fn facets_handler<R>(State(service): State<Arc<OrientationService<R>>>) -> Response
where
    R: ScenarioRepository + 'static,
{
    (StatusCode::OK, axum::Json(service.facets())).into_response()
}

pub(crate) async fn eligible_handler<R>(
    State(service): State<Arc<OrientationService<R>>>,
    Query(query): Query<EligibleQuery>,
) -> Response
where
    R: ScenarioRepository + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_RECOMMENDATION_LIMIT);
    match service.recommendations(query.average, limit) {
        Ok(recommendations) => (StatusCode::OK, axum::Json(recommendations)).into_response(),
        Err(error) => error_response(error),
    }
}
