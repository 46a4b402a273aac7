use serde::{Deserialize, Serialize};

use crate::orientation::catalog::GRADE_SCALE_MAX;

/// Maximum number of preferred cities a student may pick.
pub const MAX_PREFERRED_CITIES: usize = 3;

const DEFAULT_GRADE: f64 = 12.0;

/// Moroccan baccalauréat tracks, serialized with their official labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BacType {
    #[serde(rename = "Sciences Mathématiques A")]
    SciencesMathematiquesA,
    #[serde(rename = "Sciences Mathématiques B")]
    SciencesMathematiquesB,
    #[serde(rename = "Sciences Physiques")]
    SciencesPhysiques,
    #[serde(rename = "Sciences de la Vie et de la Terre")]
    SciencesVieTerre,
    #[serde(rename = "Sciences Économiques")]
    SciencesEconomiques,
    #[serde(rename = "Bac Technique")]
    Technique,
    #[serde(rename = "Bac Professionnel")]
    Professionnel,
}

impl BacType {
    pub const ALL: [BacType; 7] = [
        BacType::SciencesMathematiquesA,
        BacType::SciencesMathematiquesB,
        BacType::SciencesPhysiques,
        BacType::SciencesVieTerre,
        BacType::SciencesEconomiques,
        BacType::Technique,
        BacType::Professionnel,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            BacType::SciencesMathematiquesA => "Sciences Mathématiques A",
            BacType::SciencesMathematiquesB => "Sciences Mathématiques B",
            BacType::SciencesPhysiques => "Sciences Physiques",
            BacType::SciencesVieTerre => "Sciences de la Vie et de la Terre",
            BacType::SciencesEconomiques => "Sciences Économiques",
            BacType::Technique => "Bac Technique",
            BacType::Professionnel => "Bac Professionnel",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        Self::ALL.into_iter().find(|track| track.label() == trimmed)
    }
}

/// Averages for the five subjects the matcher looks at, out of 20.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubjectGrades {
    #[serde(default = "default_grade")]
    pub math: f64,
    #[serde(default = "default_grade")]
    pub physics: f64,
    #[serde(default = "default_grade")]
    pub french: f64,
    #[serde(default = "default_grade")]
    pub philosophy: f64,
    #[serde(default = "default_grade")]
    pub speciality: f64,
}

fn default_grade() -> f64 {
    DEFAULT_GRADE
}

impl Default for SubjectGrades {
    fn default() -> Self {
        Self {
            math: DEFAULT_GRADE,
            physics: DEFAULT_GRADE,
            french: DEFAULT_GRADE,
            philosophy: DEFAULT_GRADE,
            speciality: DEFAULT_GRADE,
        }
    }
}

impl SubjectGrades {
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("math", self.math),
            ("physics", self.physics),
            ("french", self.french),
            ("philosophy", self.philosophy),
            ("speciality", self.speciality),
        ]
    }

    /// Unweighted mean of the five subjects.
    pub fn average(&self) -> f64 {
        (self.math + self.physics + self.french + self.philosophy + self.speciality) / 5.0
    }
}

/// Family budget in MAD per year. Collected for the report; scoring ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetRange {
    pub min: u32,
    pub max: u32,
}

impl Default for BudgetRange {
    fn default() -> Self {
        Self {
            min: 5_000,
            max: 50_000,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectorPreference {
    Public,
    Private,
    #[default]
    Both,
}

impl SectorPreference {
    pub fn accepts(self, is_public: bool) -> bool {
        match self {
            SectorPreference::Both => true,
            SectorPreference::Public => is_public,
            SectorPreference::Private => !is_public,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            SectorPreference::Public => "Public uniquement",
            SectorPreference::Private => "Privé uniquement",
            SectorPreference::Both => "Public et Privé",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConcoursPreference {
    With,
    Without,
    #[default]
    Both,
}

impl ConcoursPreference {
    pub fn accepts(self, requires_concours: bool) -> bool {
        match self {
            ConcoursPreference::Both => true,
            ConcoursPreference::With => requires_concours,
            ConcoursPreference::Without => !requires_concours,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ConcoursPreference::With => "Avec concours",
            ConcoursPreference::Without => "Sans concours",
            ConcoursPreference::Both => "Les deux",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionConstraints {
    #[serde(default)]
    pub public_private: SectorPreference,
    #[serde(default)]
    pub concours_preference: ConcoursPreference,
    #[serde(default)]
    pub needs_housing: bool,
    #[serde(default)]
    pub needs_scholarship: bool,
}

/// Everything the matcher questionnaire collects about a student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub bac_type: BacType,
    #[serde(default)]
    pub grades: SubjectGrades,
    #[serde(default)]
    pub preferred_cities: Vec<String>,
    #[serde(default)]
    pub preferred_fields: Vec<String>,
    #[serde(default)]
    pub budget_range: BudgetRange,
    #[serde(default)]
    pub constraints: AdmissionConstraints,
}

impl StudentProfile {
    pub fn new(bac_type: BacType) -> Self {
        Self {
            bac_type,
            grades: SubjectGrades::default(),
            preferred_cities: Vec::new(),
            preferred_fields: Vec::new(),
            budget_range: BudgetRange::default(),
            constraints: AdmissionConstraints::default(),
        }
    }

    pub fn average_grade(&self) -> f64 {
        self.grades.average()
    }

    pub fn prefers_city(&self, city: &str) -> bool {
        self.preferred_cities.iter().any(|preferred| preferred == city)
    }

    pub fn prefers_field(&self, filiere: &str) -> bool {
        self.preferred_fields.iter().any(|preferred| preferred == filiere)
    }

    /// Boundary check for profiles arriving from outside. Scoring never calls this.
    pub fn validate(&self) -> Result<(), ProfileError> {
        for (subject, grade) in self.grades.entries() {
            if !grade.is_finite() || !(0.0..=GRADE_SCALE_MAX).contains(&grade) {
                return Err(ProfileError::GradeOutOfRange { subject, grade });
            }
        }

        if self.preferred_cities.len() > MAX_PREFERRED_CITIES {
            return Err(ProfileError::TooManyCities {
                count: self.preferred_cities.len(),
            });
        }

        if self.budget_range.min > self.budget_range.max {
            return Err(ProfileError::InvertedBudget {
                min: self.budget_range.min,
                max: self.budget_range.max,
            });
        }

        Ok(())
    }
}

/// Reasons a submitted profile is rejected before matching.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("grade for {subject} must be between 0 and 20 (found {grade})")]
    GradeOutOfRange { subject: &'static str, grade: f64 },
    #[error(
        "at most {max} preferred cities are allowed (found {count})",
        max = MAX_PREFERRED_CITIES
    )]
    TooManyCities { count: usize },
    #[error("budget minimum {min} exceeds maximum {max}")]
    InvertedBudget { min: u32, max: u32 },
}
