use super::common::*;
use crate::orientation::catalog::DirectoryFilter;
use crate::orientation::matching::{MatchingConfig, ProfileError};
use crate::orientation::repository::RepositoryError;
use crate::orientation::simulator::{BacNotes, Feasibility, Mention, SimulationMode};
use crate::orientation::{OrientationService, OrientationServiceError};
use chrono::NaiveDate;
use std::sync::Arc;

#[test]
fn matches_rejects_invalid_profiles() {
    let (service, _) = build_service();
    let mut student = profile();
    student.grades.math = 25.0;

    match service.matches(&student) {
        Err(OrientationServiceError::Profile(ProfileError::GradeOutOfRange { subject, .. })) => {
            assert_eq!(subject, "math");
        }
        other => panic!("expected grade validation error, got {other:?}"),
    }
}

#[test]
fn matches_returns_average_and_ranked_results() {
    let (service, _) = build_service();
    let report = service.matches(&profile()).expect("valid profile");

    assert_eq!(report.average, 12.0);
    assert!(!report.results.is_empty());
    assert!(report.results.len() <= 5);
    assert!(report
        .results
        .windows(2)
        .all(|pair| pair[0].score >= pair[1].score));
    assert!(report.results.iter().all(|result| result.score > 30));
}

#[test]
fn report_renders_for_valid_profile() {
    let (service, _) = build_service();
    let date = NaiveDate::from_ymd_opt(2025, 7, 1).expect("valid date");

    let report = service.report(&profile(), date).expect("report renders");
    assert!(report.contains("Afaqi Explorer - 01/07/2025"));
}

#[test]
fn average_returns_mention() {
    let (service, _) = build_service();
    let outcome = service.average(16.0, 16.0, 16.0).expect("valid notes");

    assert_eq!(outcome.moyenne, 16.0);
    assert_eq!(outcome.mention, Mention::TresBien);
    assert!(matches!(
        service.average(16.0, -1.0, 16.0),
        Err(OrientationServiceError::InvalidNotes)
    ));
}

#[test]
fn required_national_reports_feasibility() {
    let (service, _) = build_service();

    let reachable = service
        .required_national(14.5, Some(12.0), Some(14.0))
        .expect("valid notes");
    assert_eq!(reachable.national, Some(16.0));
    assert_eq!(reachable.feasibility, Some(Feasibility::Reachable));

    let missing = service
        .required_national(14.5, None, Some(14.0))
        .expect("valid notes");
    assert_eq!(missing.national, None);
    assert_eq!(missing.feasibility, None);
}

#[test]
fn recommendations_reject_targets_off_the_scale() {
    let (service, _) = build_service();

    for target in [-4.0, 20.5, f64::NAN] {
        assert!(matches!(
            service.recommendations(Some(target), 10),
            Err(OrientationServiceError::InvalidNotes)
        ));
    }

    let empty = service.recommendations(None, 10).expect("no target");
    assert_eq!(empty.total, 0);
    let top = service.recommendations(Some(20.0), 10).expect("valid target");
    assert!(top.total > 0);
}

#[test]
fn directory_and_facets_cover_bundled_catalog() {
    let (service, _) = build_service();
    let all = service.directory(&DirectoryFilter::default());
    assert_eq!(all.len(), service.catalog().len());

    let rabat = service.directory(&DirectoryFilter {
        city: Some("Rabat".to_string()),
        ..DirectoryFilter::default()
    });
    assert!(!rabat.is_empty());
    assert!(rabat.iter().all(|school| school.city == "Rabat"));

    let facets = service.facets();
    assert!(facets.cities.contains(&"Rabat".to_string()));
}

#[test]
fn save_scenario_stores_newest_first() {
    let (service, repository) = build_service();

    let first = service
        .save_scenario(
            BacNotes {
                regional: Some(12.0),
                controle_continue: Some(14.0),
                national: Some(16.0),
                moyenne: None,
            },
            SimulationMode::Calculate,
        )
        .expect("average computed");
    assert_eq!(first.result, 14.5);
    assert!(first.id.starts_with("scn-"));

    let second = service
        .save_scenario(
            BacNotes {
                regional: Some(12.0),
                controle_continue: Some(14.0),
                national: None,
                moyenne: Some(15.0),
            },
            SimulationMode::Reverse,
        )
        .expect("target saved");
    assert_eq!(second.inputs.national, Some(17.0));

    let recent = service.recent_scenarios().expect("history readable");
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].id, second.id);
    assert_eq!(repository.history.lock().expect("mutex").len(), 2);
}

#[test]
fn save_scenario_requires_a_result() {
    let (service, _) = build_service();
    let incomplete = BacNotes {
        regional: Some(12.0),
        ..BacNotes::default()
    };

    assert!(matches!(
        service.save_scenario(incomplete, SimulationMode::Calculate),
        Err(OrientationServiceError::MissingResult)
    ));
}

#[test]
fn save_scenario_surfaces_repository_failures() {
    let service = OrientationService::new(
        bundled_catalog(),
        Arc::new(UnavailableRepository),
        MatchingConfig::default(),
    );
    let notes = BacNotes {
        moyenne: Some(13.0),
        ..BacNotes::default()
    };

    match service.save_scenario(notes, SimulationMode::Calculate) {
        Err(OrientationServiceError::Repository(RepositoryError::Unavailable(reason))) => {
            assert_eq!(reason, "database offline");
        }
        other => panic!("expected repository failure, got {other:?}"),
    }
}
