//! End-to-end matching scenarios against the bundled catalog and CSV imports,
//! exercised through the public crate surface only.

use afaqi::orientation::matching::{BacType, ConcoursPreference, SectorPreference};
use afaqi::orientation::{
    compute_matches, render_report, report_file_name, EntryThreshold, MatchingEngine,
    SchoolCatalog, StudentProfile, SubjectGrades,
};
use chrono::NaiveDate;

fn engineering_student() -> StudentProfile {
    let mut profile = StudentProfile::new(BacType::SciencesMathematiquesA);
    profile.grades = SubjectGrades {
        math: 17.0,
        physics: 16.5,
        french: 14.0,
        philosophy: 13.0,
        speciality: 17.5,
    };
    profile.preferred_cities = vec!["Rabat".to_string(), "Casablanca".to_string()];
    profile.preferred_fields = vec!["Ingénierie".to_string()];
    profile
}

#[test]
fn strong_engineering_profile_ranks_rabat_engineering_first() {
    let catalog = SchoolCatalog::bundled().expect("bundled catalog is valid");
    let profile = engineering_student();

    let matches = compute_matches(&profile, catalog.schools());

    assert!(!matches.is_empty());
    assert!(matches.len() <= 5);
    let best = &matches[0];
    assert_eq!(best.school.filiere, "Ingénierie");
    assert!(best.score >= 90, "best score was {}", best.score);
    assert!(matches.windows(2).all(|pair| pair[0].score >= pair[1].score));
}

#[test]
fn restrictive_preferences_never_raise_scores() {
    let catalog = SchoolCatalog::bundled().expect("bundled catalog is valid");
    let open = engineering_student();
    let mut strict = engineering_student();
    strict.constraints.public_private = SectorPreference::Private;
    strict.constraints.concours_preference = ConcoursPreference::Without;

    let engine = MatchingEngine::default();
    for school in catalog.schools() {
        let relaxed = engine.score(&open, school).score;
        let constrained = engine.score(&strict, school).score;
        assert!(constrained <= relaxed, "{} scored higher when constrained", school.name);
    }
}

#[test]
fn csv_catalog_feeds_the_matcher() {
    let csv = "id,name,city,type,filiere,description,bac_types,seuil_entree,is_public,requires_concours,admission_type,specialties,students,website\n\
1,ENSA Safi,Safi,Public Engineering School,Ingénierie,Cycle ingénieur,Sciences Mathématiques A|Sciences Physiques,Sciences Mathématiques A=12;Sciences Physiques=14,true,false,Preselection,Génie Informatique,1200,\n\
2,FSJES Settat,Settat,Faculté,Droit,,Sciences Économiques|Sciences Mathématiques A,NA,true,false,Direct,Droit privé,,\n";

    let catalog = SchoolCatalog::from_csv_reader(csv.as_bytes()).expect("csv parses");
    assert_eq!(catalog.len(), 2);
    assert_eq!(
        catalog.get(2).map(|school| &school.entry_threshold),
        Some(&EntryThreshold::Unrestricted)
    );

    let matches = compute_matches(&engineering_student(), catalog.schools());
    let ids: Vec<u32> = matches.iter().map(|result| result.school.id).collect();
    // Safi: 25 + 20 + 20 + 10 + 10; Settat: 25 + 10 + 10 + 10
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(matches[0].score, 85);
    assert_eq!(matches[1].score, 55);
}

#[test]
fn report_file_is_named_after_generation_date() {
    let catalog = SchoolCatalog::bundled().expect("bundled catalog is valid");
    let profile = engineering_student();
    let matches = compute_matches(&profile, catalog.schools());
    let date = NaiveDate::from_ymd_opt(2025, 9, 1).expect("valid date");

    let report = render_report(&profile, &matches, date);

    assert_eq!(report_file_name(date), "Rapport_Orientation_2025-09-01.txt");
    assert!(report.contains(&format!("RECOMMANDATIONS ({} écoles)", matches.len())));
    for result in &matches {
        assert!(report.contains(&result.school.name));
    }
}
