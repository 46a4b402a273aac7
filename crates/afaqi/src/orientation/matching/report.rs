use std::fmt::Write;

use chrono::NaiveDate;

use super::profile::StudentProfile;
use super::rules::MatchCriterion;
use super::{SchoolMatch, DEFAULT_SCORE_FLOOR};

const RULE: &str = "====================================";

/// File name offered when the report is downloaded.
pub fn report_file_name(generated_on: NaiveDate) -> String {
    format!("Rapport_Orientation_{}.txt", generated_on.format("%Y-%m-%d"))
}

/// Plain-text orientation report for a profile and its ranked matches.
pub fn render_report(
    profile: &StudentProfile,
    matches: &[SchoolMatch<'_>],
    generated_on: NaiveDate,
) -> String {
    let mut out = String::new();
    let grades = &profile.grades;
    let constraints = &profile.constraints;

    writeln!(out, "RAPPORT D'ORIENTATION PERSONNALISÉ").expect("write title");
    writeln!(out, "Afaqi Explorer - {}\n", generated_on.format("%d/%m/%Y")).expect("write date");
    section(&mut out, "PROFIL ÉTUDIANT");
    writeln!(out, "Type de Baccalauréat: {}\n", profile.bac_type.label()).expect("write bac type");
    writeln!(out, "Moyennes par matière:").expect("write grades heading");
    writeln!(out, "• Mathématiques: {}/20", grades.math).expect("write math");
    writeln!(out, "• Physique-Chimie: {}/20", grades.physics).expect("write physics");
    writeln!(out, "• Français: {}/20", grades.french).expect("write french");
    writeln!(out, "• Philosophie: {}/20", grades.philosophy).expect("write philosophy");
    writeln!(out, "• Matière de spécialité: {}/20", grades.speciality).expect("write speciality");
    writeln!(out, "• Moyenne générale: {:.2}/20\n", grades.average()).expect("write average");
    writeln!(out, "Villes préférées: {}", profile.preferred_cities.join(", ")).expect("write cities");
    writeln!(
        out,
        "Domaines d'intérêt: {}\n",
        profile.preferred_fields.join(", ")
    )
    .expect("write fields");
    writeln!(
        out,
        "Budget familial: {} - {} MAD\n",
        group_thousands(profile.budget_range.min),
        group_thousands(profile.budget_range.max)
    )
    .expect("write budget");
    writeln!(out, "Préférences:").expect("write preferences heading");
    writeln!(out, "• Secteur: {}", constraints.public_private.label()).expect("write sector");
    writeln!(
        out,
        "• Mode d'admission: {}",
        constraints.concours_preference.label()
    )
    .expect("write admission mode");
    writeln!(out, "• Logement étudiant: {}", yes_no(constraints.needs_housing))
        .expect("write housing");
    writeln!(
        out,
        "• Bourse d'études: {}\n",
        yes_no(constraints.needs_scholarship)
    )
    .expect("write scholarship");
    section(&mut out, &format!("RECOMMANDATIONS ({} écoles)", matches.len()));

    for (index, result) in matches.iter().enumerate() {
        write_match(&mut out, index + 1, result);
    }

    writeln!(out).expect("write spacer");
    section(&mut out, "MÉTHODOLOGIE DE CORRESPONDANCE");
    writeln!(
        out,
        "Notre algorithme d'orientation évalue votre profil selon ces critères:\n"
    )
    .expect("write methodology intro");
    for criterion in MatchCriterion::ALL {
        writeln!(out, "• {} ({}%)", criterion.label(), criterion.weight())
            .expect("write criterion");
    }
    writeln!(out, "\nScore minimum affiché: {DEFAULT_SCORE_FLOOR}%\n").expect("write floor");
    section(&mut out, "CONSEILS ET PROCHAINES ÉTAPES");
    for (step, advice) in NEXT_STEPS.iter().enumerate() {
        writeln!(out, "{}. {advice}", step + 1).expect("write next step");
    }
    writeln!(out, "\nRapport généré automatiquement par Afaqi Explorer").expect("write footer");

    out
}

const NEXT_STEPS: [&str; 5] = [
    "Contactez directement les écoles qui vous intéressent",
    "Vérifiez les dates limites d'inscription",
    "Préparez vos dossiers de candidature",
    "Explorez les possibilités de bourses et d'aide financière",
    "Visitez les campus si possible",
];

fn write_match(out: &mut String, rank: usize, result: &SchoolMatch<'_>) {
    let school = result.school;
    let stats = &school.stats;
    let contact = &school.contact;

    writeln!(out, "\n{rank}. {}", school.name).expect("write school name");
    writeln!(out, "   Compatibilité: {}%", result.score).expect("write score");
    writeln!(out, "   Ville: {}", school.city).expect("write city");
    writeln!(out, "   Type: {}", school.institution_type).expect("write institution type");
    writeln!(out, "   Filière: {}", school.filiere).expect("write filiere");
    writeln!(out, "   Seuil d'entrée: {}\n", school.entry_threshold).expect("write threshold");
    writeln!(out, "   Description:\n   {}\n", school.description).expect("write description");
    writeln!(out, "   Raisons de correspondance:").expect("write reasons heading");
    for reason in &result.reasons {
        writeln!(out, "   ✓ {reason}").expect("write reason");
    }
    writeln!(out, "\n   Contact:").expect("write contact heading");
    writeln!(out, "   • Téléphone: {}", or_dash(contact.phone.as_deref())).expect("write phone");
    writeln!(out, "   • Email: {}", or_dash(contact.email.as_deref())).expect("write email");
    writeln!(out, "   • Site web: {}\n", or_dash(contact.website.as_deref()))
        .expect("write website");
    writeln!(out, "   Informations supplémentaires:").expect("write stats heading");
    writeln!(
        out,
        "   • Étudiants: {}",
        or_dash(stats.students.map(group_thousands).as_deref())
    )
    .expect("write students");
    writeln!(
        out,
        "   • Fondée en: {}",
        or_dash(stats.founded.map(|year| year.to_string()).as_deref())
    )
    .expect("write founded");
    writeln!(out, "   • Taux de réussite: {}", percent(stats.success_rate))
        .expect("write success rate");
    writeln!(out, "   • Taux d'emploi: {}", percent(stats.employment_rate))
        .expect("write employment rate");
    writeln!(
        out,
        "   • Salaire moyen: {}\n",
        stats
            .average_salary
            .map(|salary| format!("{} MAD", group_thousands(salary)))
            .unwrap_or_else(|| "-".to_string())
    )
    .expect("write salary");
    writeln!(out, "   Spécialités: {}", school.specialties.join(", ")).expect("write specialties");
    writeln!(out, "   Programmes: {}\n", school.programs.join(", ")).expect("write programs");
    writeln!(out, "{}", "=".repeat(50)).expect("write separator");
}

fn section(out: &mut String, title: &str) {
    writeln!(out, "{RULE}\n{title}\n{RULE}\n").expect("write section heading");
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Oui"
    } else {
        "Non"
    }
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

fn percent(value: Option<f32>) -> String {
    value.map_or_else(|| "-".to_string(), |rate| format!("{rate}%"))
}

/// `50000` -> `50 000`.
pub(crate) fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::matching::BacType;

    #[test]
    fn groups_thousands_with_spaces() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(950), "950");
        assert_eq!(group_thousands(5_000), "5 000");
        assert_eq!(group_thousands(1_250_000), "1 250 000");
    }

    #[test]
    fn empty_report_keeps_section_layout() {
        let profile = StudentProfile::new(BacType::SciencesPhysiques);
        let date = NaiveDate::from_ymd_opt(2025, 7, 3).expect("valid date");

        let report = render_report(&profile, &[], date);

        let recommendations = format!("{RULE}\nRECOMMANDATIONS (0 écoles)\n{RULE}\n\n");
        assert!(report.contains(&recommendations));
        assert!(report.contains("Afaqi Explorer - 03/07/2025\n\n"));
        assert!(report.contains("\n\nScore minimum affiché: 30%\n\n"));
        assert!(report.contains("5. Visitez les campus si possible\n\nRapport généré"));
        assert!(report.ends_with("Rapport généré automatiquement par Afaqi Explorer\n"));
    }

    #[test]
    fn file_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2025, 7, 3).expect("valid date");
        assert_eq!(report_file_name(date), "Rapport_Orientation_2025-07-03.txt");
    }
}
