use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Entry bar a school sets on the bac average (0–20 scale).
///
/// On the wire this keeps the catalog's historical shape: a bare number, an
/// object keyed by bac track, or the string `"NA"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawThreshold", into = "RawThreshold")]
pub enum EntryThreshold {
    Flat(f64),
    PerTrack(BTreeMap<String, f64>),
    /// No numeric bar; every candidate clears it.
    Unrestricted,
}

impl EntryThreshold {
    const UNRESTRICTED_MARKER: &'static str = "NA";

    /// Threshold the student's own track has to clear, if the school sets one.
    pub fn for_track(&self, track: &str) -> Option<f64> {
        match self {
            EntryThreshold::Flat(value) => Some(*value),
            EntryThreshold::PerTrack(values) => values.get(track).copied(),
            EntryThreshold::Unrestricted => None,
        }
    }

    /// Hardest bar: the value itself, or the highest per-track value.
    pub fn highest(&self) -> Option<f64> {
        match self {
            EntryThreshold::Flat(value) => Some(*value),
            EntryThreshold::PerTrack(values) => values.values().copied().reduce(f64::max),
            EntryThreshold::Unrestricted => None,
        }
    }

    /// Easiest bar: the value itself, or the lowest per-track value.
    pub fn lowest(&self) -> Option<f64> {
        match self {
            EntryThreshold::Flat(value) => Some(*value),
            EntryThreshold::PerTrack(values) => values.values().copied().reduce(f64::min),
            EntryThreshold::Unrestricted => None,
        }
    }

    pub fn values(&self) -> Vec<f64> {
        match self {
            EntryThreshold::Flat(value) => vec![*value],
            EntryThreshold::PerTrack(values) => values.values().copied().collect(),
            EntryThreshold::Unrestricted => Vec::new(),
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        matches!(self, EntryThreshold::Unrestricted)
    }
}

impl fmt::Display for EntryThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryThreshold::Flat(value) => write!(f, "{value}/20"),
            EntryThreshold::PerTrack(values) => {
                let rendered = values
                    .iter()
                    .map(|(track, value)| format!("{track}: {value}/20"))
                    .collect::<Vec<_>>()
                    .join(", ");
                f.write_str(&rendered)
            }
            EntryThreshold::Unrestricted => f.write_str(Self::UNRESTRICTED_MARKER),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawThreshold {
    Number(f64),
    Tracks(BTreeMap<String, f64>),
    Marker(String),
}

impl TryFrom<RawThreshold> for EntryThreshold {
    type Error = String;

    fn try_from(raw: RawThreshold) -> Result<Self, Self::Error> {
        match raw {
            RawThreshold::Number(value) => Ok(EntryThreshold::Flat(value)),
            RawThreshold::Tracks(values) => Ok(EntryThreshold::PerTrack(values)),
            RawThreshold::Marker(marker)
                if marker
                    .trim()
                    .eq_ignore_ascii_case(EntryThreshold::UNRESTRICTED_MARKER) =>
            {
                Ok(EntryThreshold::Unrestricted)
            }
            RawThreshold::Marker(other) => Err(format!(
                "unknown entry threshold marker '{other}' (expected a number, an object or \"NA\")"
            )),
        }
    }
}

impl From<EntryThreshold> for RawThreshold {
    fn from(threshold: EntryThreshold) -> Self {
        match threshold {
            EntryThreshold::Flat(value) => RawThreshold::Number(value),
            EntryThreshold::PerTrack(values) => RawThreshold::Tracks(values),
            EntryThreshold::Unrestricted => {
                RawThreshold::Marker(EntryThreshold::UNRESTRICTED_MARKER.to_string())
            }
        }
    }
}

/// How a school admits its students.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdmissionType {
    Concours,
    Preselection,
    Combined,
    Direct,
}

impl AdmissionType {
    pub const fn label(self) -> &'static str {
        match self {
            AdmissionType::Concours => "Concours",
            AdmissionType::Preselection => "Présélection",
            AdmissionType::Combined => "Présélection + Concours",
            AdmissionType::Direct => "Accès direct",
        }
    }
}

/// Display-only figures published alongside a school.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchoolStats {
    #[serde(default)]
    pub students: Option<u32>,
    #[serde(default)]
    pub success_rate: Option<f32>,
    #[serde(default)]
    pub employment_rate: Option<f32>,
    #[serde(default)]
    pub average_salary: Option<u32>,
    #[serde(default)]
    pub founded: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolContact {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

/// Immutable catalog entry for a post-bac institution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct School {
    pub id: u32,
    pub name: String,
    pub city: String,
    #[serde(rename = "type")]
    pub institution_type: String,
    pub filiere: String,
    #[serde(default)]
    pub description: String,
    pub bac_types: Vec<String>,
    #[serde(rename = "seuil_entree")]
    pub entry_threshold: EntryThreshold,
    pub is_public: bool,
    pub requires_concours: bool,
    pub admission_type: AdmissionType,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub programs: Vec<String>,
    #[serde(flatten)]
    pub stats: SchoolStats,
    #[serde(flatten)]
    pub contact: SchoolContact,
}

impl School {
    pub fn accepts_track(&self, track: &str) -> bool {
        self.bac_types.iter().any(|accepted| accepted == track)
    }

    pub fn sector_label(&self) -> &'static str {
        if self.is_public {
            "Public"
        } else {
            "Privé"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn threshold_reads_every_catalog_shape() {
        let flat: EntryThreshold = serde_json::from_value(json!(14.5)).expect("number");
        assert_eq!(flat, EntryThreshold::Flat(14.5));

        let open: EntryThreshold = serde_json::from_value(json!("NA")).expect("marker");
        assert_eq!(open, EntryThreshold::Unrestricted);

        let tracks: EntryThreshold = serde_json::from_value(json!({
            "Sciences Physiques": 14.0,
            "Sciences Mathématiques A": 12.0
        }))
        .expect("object");
        assert_eq!(tracks.for_track("Sciences Physiques"), Some(14.0));
        assert_eq!(tracks.for_track("Bac Technique"), None);
        assert_eq!(tracks.highest(), Some(14.0));
        assert_eq!(tracks.lowest(), Some(12.0));
    }

    #[test]
    fn threshold_rejects_unknown_marker() {
        let err = serde_json::from_value::<EntryThreshold>(json!("sur dossier"))
            .expect_err("only NA is a valid marker");
        assert!(err.to_string().contains("sur dossier"));
    }

    #[test]
    fn threshold_serializes_back_to_catalog_shape() {
        assert_eq!(
            serde_json::to_value(EntryThreshold::Unrestricted).expect("serializes"),
            json!("NA")
        );
        assert_eq!(
            serde_json::to_value(EntryThreshold::Flat(12.0)).expect("serializes"),
            json!(12.0)
        );
    }

    #[test]
    fn threshold_display_lists_tracks() {
        let mut values = BTreeMap::new();
        values.insert("Bac Technique".to_string(), 15.0);
        values.insert("Sciences Physiques".to_string(), 14.5);
        let rendered = EntryThreshold::PerTrack(values).to_string();
        assert_eq!(rendered, "Bac Technique: 15/20, Sciences Physiques: 14.5/20");
        assert_eq!(EntryThreshold::Flat(12.0).to_string(), "12/20");
    }
}
