use crate::infra::{build_service, parse_date};
use afaqi::error::AppError;
use afaqi::orientation::matching::{BacType, ConcoursPreference, SectorPreference};
use afaqi::orientation::{BacNotes, SimulationMode, StudentProfile, SubjectGrades};
use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;

const DEMO_RECOMMENDATIONS: usize = 5;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the report date (defaults to today).
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Catalog export to use instead of the bundled sample.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Print the full orientation report after the ranking.
    #[arg(long)]
    pub(crate) full_report: bool,
    /// Skip the grade simulator portion of the demo.
    #[arg(long)]
    pub(crate) skip_simulator: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        today,
        catalog,
        full_report,
        skip_simulator,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let service = build_service(catalog.as_deref())?;
    let profile = demo_profile();

    println!("Afaqi Explorer demo ({} écoles au catalogue)", service.catalog().len());
    println!(
        "\nProfil: {} | moyenne {:.2}/20 | villes {} | filières {}",
        profile.bac_type.label(),
        profile.average_grade(),
        profile.preferred_cities.join(", "),
        profile.preferred_fields.join(", ")
    );

    let outcome = service.matches(&profile)?;
    println!("Top {} correspondances:", outcome.results.len());
    for result in &outcome.results {
        println!(
            "- {:>3}% {} ({}, {})",
            result.score,
            result.school.name,
            result.school.city,
            result.school.sector_label()
        );
        for component in &result.components {
            println!("    +{:>2} {}", component.points, component.reason);
        }
    }

    if full_report {
        println!("\n{}", service.report(&profile, today)?);
    }

    if skip_simulator {
        return Ok(());
    }

    println!("\nSimulateur de moyenne du bac");
    let notes = BacNotes {
        regional: Some(13.5),
        controle_continue: Some(15.0),
        national: Some(14.25),
        moyenne: None,
    };
    let saved = service.save_scenario(notes, SimulationMode::Calculate)?;
    let average = service.average(13.5, 15.0, 14.25)?;
    println!(
        "- Régional 13.50 | Contrôle continu 15.00 | National 14.25 -> {:.2}/20 ({})",
        average.moyenne,
        average.mention.label()
    );

    let target = 16.0;
    let required = service.required_national(target, notes.regional, notes.controle_continue)?;
    if let (Some(national), Some(feasibility)) = (required.national, required.feasibility) {
        println!(
            "- Pour viser {target:.2}/20 il faut {national:.2}/20 au national: {}",
            feasibility.label()
        );
    }
    service.save_scenario(
        BacNotes {
            moyenne: Some(target),
            ..notes
        },
        SimulationMode::Reverse,
    )?;

    let list = service.recommendations(Some(saved.result), DEMO_RECOMMENDATIONS)?;
    println!(
        "\nÉcoles accessibles avec {:.2}/20: {} (affichées {}, {} autres)",
        saved.result,
        list.total,
        list.shown.len(),
        list.remaining
    );
    for card in &list.shown {
        println!(
            "- {} | seuil {:.2} | marge {:+.2} | {}",
            card.school.name,
            card.threshold,
            card.margin,
            card.strength.label()
        );
    }

    let history = service.recent_scenarios()?;
    println!("\nHistorique ({} scénarios):", history.len());
    for scenario in history {
        println!(
            "- {} [{:?}] résultat {:.2} ({})",
            scenario.id,
            scenario.kind,
            scenario.result,
            scenario.recorded_at.format("%Y-%m-%d %H:%M")
        );
    }

    Ok(())
}

fn demo_profile() -> StudentProfile {
    let mut profile = StudentProfile::new(BacType::SciencesPhysiques);
    profile.grades = SubjectGrades {
        math: 15.5,
        physics: 16.0,
        french: 13.0,
        philosophy: 12.5,
        speciality: 15.0,
    };
    profile.preferred_cities = vec!["Rabat".to_string(), "Kénitra".to_string()];
    profile.preferred_fields = vec!["Ingénierie".to_string(), "Sciences de la Santé".to_string()];
    profile.constraints.public_private = SectorPreference::Public;
    profile.constraints.concours_preference = ConcoursPreference::Both;
    profile.constraints.needs_housing = true;
    profile
}
