use crate::infra::{build_service, parse_date};
use afaqi::error::AppError;
use afaqi::orientation::{report_file_name, DirectoryFilter, StudentProfile};
use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// Student profile as JSON
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Catalog export (.json or .csv); defaults to the bundled sample
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Write the orientation report to this file or directory
    #[arg(long)]
    pub(crate) report: Option<PathBuf>,
    /// Report date (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct AverageArgs {
    #[arg(long)]
    pub(crate) regional: f64,
    #[arg(long)]
    pub(crate) controle_continue: f64,
    #[arg(long)]
    pub(crate) national: f64,
}

#[derive(Args, Debug)]
pub(crate) struct RequiredArgs {
    /// Target final average
    #[arg(long)]
    pub(crate) target: f64,
    #[arg(long)]
    pub(crate) regional: Option<f64>,
    #[arg(long)]
    pub(crate) controle_continue: Option<f64>,
}

#[derive(Args, Debug)]
pub(crate) struct EligibleArgs {
    /// Bac average to test against entry thresholds
    #[arg(long)]
    pub(crate) average: f64,
    /// Number of schools to print
    #[arg(long, default_value_t = afaqi::orientation::simulator::DEFAULT_RECOMMENDATION_LIMIT)]
    pub(crate) limit: usize,
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ListArgs {
    #[arg(long)]
    pub(crate) filiere: Option<String>,
    #[arg(long)]
    pub(crate) city: Option<String>,
    #[arg(long)]
    pub(crate) bac_type: Option<String>,
    #[arg(long = "type")]
    pub(crate) institution_type: Option<String>,
    #[arg(long)]
    pub(crate) specialty: Option<String>,
    /// Only schools whose hardest bar reaches this value (open schools always listed)
    #[arg(long)]
    pub(crate) min_threshold: Option<f64>,
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let MatchArgs {
        profile,
        catalog,
        report,
        today,
    } = args;

    let raw = std::fs::read_to_string(&profile)?;
    let profile: StudentProfile = serde_json::from_str(&raw).map_err(|err| {
        AppError::Input(format!("profile {} is not valid JSON: {err}", profile.display()))
    })?;
    let service = build_service(catalog.as_deref())?;
    let outcome = service.matches(&profile)?;

    println!(
        "Profil: {} | moyenne générale {:.2}/20",
        profile.bac_type.label(),
        outcome.average
    );
    if outcome.results.is_empty() {
        println!("Aucune école ne dépasse le score minimum de correspondance.");
    }
    for (index, result) in outcome.results.iter().enumerate() {
        println!(
            "{}. {} ({}) - {}%",
            index + 1,
            result.school.name,
            result.school.city,
            result.score
        );
        for reason in &result.reasons {
            println!("   ✓ {reason}");
        }
    }

    if let Some(target) = report {
        let today = today.unwrap_or_else(|| Local::now().date_naive());
        let path = if target.is_dir() {
            target.join(report_file_name(today))
        } else {
            target
        };
        let rendered = service.report(&profile, today)?;
        std::fs::write(&path, rendered)?;
        println!("Rapport écrit dans {}", path.display());
    }

    Ok(())
}

pub(crate) fn run_average(args: AverageArgs) -> Result<(), AppError> {
    let service = build_service(None)?;
    let outcome = service.average(args.regional, args.controle_continue, args.national)?;
    println!(
        "Moyenne générale: {:.2}/20 ({})",
        outcome.moyenne,
        outcome.mention.label()
    );
    Ok(())
}

pub(crate) fn run_required(args: RequiredArgs) -> Result<(), AppError> {
    let service = build_service(None)?;
    let required =
        service.required_national(args.target, args.regional, args.controle_continue)?;

    match (required.national, required.feasibility) {
        (Some(national), Some(feasibility)) => {
            println!("Note nationale requise: {national:.2}/20");
            println!("{}", feasibility.label());
        }
        _ => println!("Renseignez les notes régionale et de contrôle continu."),
    }
    Ok(())
}

pub(crate) fn run_eligible(args: EligibleArgs) -> Result<(), AppError> {
    let service = build_service(args.catalog.as_deref())?;
    let list = service.recommendations(Some(args.average), args.limit)?;

    println!(
        "{} école(s) accessibles avec une moyenne de {:.2}/20",
        list.total, args.average
    );
    for card in &list.shown {
        println!(
            "- {} ({}) | seuil {:.2} | marge {:+.2} | {}",
            card.school.name,
            card.school.city,
            card.threshold,
            card.margin,
            card.strength.label()
        );
    }
    if list.remaining > 0 {
        println!("... et {} autres écoles", list.remaining);
    }
    Ok(())
}

pub(crate) fn run_list(args: ListArgs) -> Result<(), AppError> {
    let service = build_service(args.catalog.as_deref())?;
    let filter = directory_filter(&args);
    let schools = service.directory(&filter);

    println!("{} école(s)", schools.len());
    for school in schools {
        println!(
            "{}. {} | {} | {} | {} | seuil {}",
            school.id,
            school.name,
            school.city,
            school.filiere,
            school.sector_label(),
            school.entry_threshold
        );
    }
    Ok(())
}

fn directory_filter(args: &ListArgs) -> DirectoryFilter {
    DirectoryFilter {
        filiere: args.filiere.clone(),
        city: args.city.clone(),
        bac_type: args.bac_type.clone(),
        institution_type: args.institution_type.clone(),
        specialty: args.specialty.clone(),
        min_threshold: args.min_threshold,
    }
}
