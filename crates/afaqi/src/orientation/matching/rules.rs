use super::profile::StudentProfile;
use super::ScoreComponent;
use crate::orientation::catalog::{EntryThreshold, School};
use serde::{Deserialize, Serialize};

pub const BAC_TYPE_WEIGHT: u8 = 25;
pub const FIELD_WEIGHT: u8 = 20;
pub const CITY_WEIGHT: u8 = 15;
pub const GRADE_WEIGHT: u8 = 20;
/// Awarded when the school publishes no numeric threshold.
pub const FLEXIBLE_GRADE_WEIGHT: u8 = 10;
pub const SECTOR_WEIGHT: u8 = 10;
pub const ADMISSION_WEIGHT: u8 = 10;

/// Criteria scored by the matcher, in the order their reasons are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchCriterion {
    BacType,
    Field,
    City,
    GradeThreshold,
    Sector,
    AdmissionMode,
}

impl MatchCriterion {
    pub const ALL: [MatchCriterion; 6] = [
        MatchCriterion::BacType,
        MatchCriterion::Field,
        MatchCriterion::City,
        MatchCriterion::GradeThreshold,
        MatchCriterion::Sector,
        MatchCriterion::AdmissionMode,
    ];

    pub const fn weight(self) -> u8 {
        match self {
            MatchCriterion::BacType => BAC_TYPE_WEIGHT,
            MatchCriterion::Field => FIELD_WEIGHT,
            MatchCriterion::City => CITY_WEIGHT,
            MatchCriterion::GradeThreshold => GRADE_WEIGHT,
            MatchCriterion::Sector => SECTOR_WEIGHT,
            MatchCriterion::AdmissionMode => ADMISSION_WEIGHT,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            MatchCriterion::BacType => "Type de Baccalauréat",
            MatchCriterion::Field => "Domaine d'études",
            MatchCriterion::City => "Localisation",
            MatchCriterion::GradeThreshold => "Compatibilité des notes",
            MatchCriterion::Sector => "Secteur public/privé",
            MatchCriterion::AdmissionMode => "Mode d'admission",
        }
    }
}

/// Score one school. Components that do not match are simply absent.
pub(crate) fn score_school(profile: &StudentProfile, school: &School) -> (Vec<ScoreComponent>, u8) {
    let mut components = Vec::with_capacity(MatchCriterion::ALL.len());
    let mut total: u8 = 0;
    let mut award = |criterion: MatchCriterion, points: u8, reason: String| {
        total += points;
        components.push(ScoreComponent {
            criterion,
            points,
            reason,
        });
    };

    let track = profile.bac_type.label();
    if school.accepts_track(track) {
        award(
            MatchCriterion::BacType,
            BAC_TYPE_WEIGHT,
            format!("Accepte votre type de bac ({track})"),
        );
    }

    if profile.prefers_field(&school.filiere) {
        award(
            MatchCriterion::Field,
            FIELD_WEIGHT,
            format!("Correspond à votre filière préférée ({})", school.filiere),
        );
    }

    if profile.prefers_city(&school.city) {
        award(
            MatchCriterion::City,
            CITY_WEIGHT,
            format!("Située dans une ville de votre choix ({})", school.city),
        );
    }

    let average = profile.average_grade();
    match &school.entry_threshold {
        EntryThreshold::Unrestricted => award(
            MatchCriterion::GradeThreshold,
            FLEXIBLE_GRADE_WEIGHT,
            "Seuil d'admission flexible".to_string(),
        ),
        EntryThreshold::Flat(threshold) => {
            if average >= *threshold {
                award(
                    MatchCriterion::GradeThreshold,
                    GRADE_WEIGHT,
                    format!(
                        "Votre moyenne ({}) dépasse le seuil requis",
                        one_decimal(average)
                    ),
                );
            }
        }
        // Only the student's own track counts; other tracks' bars are ignored.
        EntryThreshold::PerTrack(thresholds) => {
            if let Some(threshold) = thresholds.get(track) {
                if average >= *threshold {
                    award(
                        MatchCriterion::GradeThreshold,
                        GRADE_WEIGHT,
                        format!(
                            "Votre moyenne ({}) dépasse le seuil requis ({threshold})",
                            one_decimal(average)
                        ),
                    );
                }
            }
        }
    }

    if profile.constraints.public_private.accepts(school.is_public) {
        let reason = if school.is_public {
            "École publique"
        } else {
            "École privée"
        };
        award(MatchCriterion::Sector, SECTOR_WEIGHT, reason.to_string());
    }

    if profile
        .constraints
        .concours_preference
        .accepts(school.requires_concours)
    {
        let reason = if school.requires_concours {
            "Admission par concours"
        } else {
            "Admission directe"
        };
        award(
            MatchCriterion::AdmissionMode,
            ADMISSION_WEIGHT,
            reason.to_string(),
        );
    }

    (components, total)
}

/// One decimal from the exact stored value; only exact halves round up.
pub(crate) fn one_decimal(value: f64) -> String {
    if is_exact_hundredth_half(value) {
        return format!("{:.1}", ((value * 10.0).floor() + 1.0) / 10.0);
    }
    format!("{value:.1}")
}

// 12.25 is stored exactly and must round up; 12.35 is stored as 12.3499… and must not.
fn is_exact_hundredth_half(value: f64) -> bool {
    let exact = format!("{value:.64}");
    match exact.split_once('.') {
        Some((_, fraction)) => {
            let digits = fraction.as_bytes();
            digits.len() > 1 && digits[1] == b'5' && digits[2..].iter().all(|digit| *digit == b'0')
        }
        None => false,
    }
}
