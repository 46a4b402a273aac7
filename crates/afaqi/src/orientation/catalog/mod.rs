//! Read-only school catalog consumed by the matcher and the recommender.
//!
//! The catalog is supplied from outside (a JSON or CSV export); the engine never
//! mutates it. Loading validates the invariants the scoring code relies on so a
//! malformed export fails at startup instead of skewing scores.

pub mod directory;
pub mod domain;
mod import;

pub use directory::{DirectoryFacets, DirectoryFilter, THRESHOLD_SLIDER};
pub use domain::{AdmissionType, EntryThreshold, School, SchoolContact, SchoolStats};

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

const BUNDLED_CATALOG: &str = include_str!("../../../data/schools.json");

/// Highest value on the Moroccan grading scale.
pub const GRADE_SCALE_MAX: f64 = 20.0;

/// Errors raised while loading or validating a catalog export.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("unable to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed catalog CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("catalog row {row}: {detail}")]
    InvalidRow { row: usize, detail: String },
    #[error("school id {0} appears more than once")]
    DuplicateId(u32),
    #[error("school {school_id} declares threshold {value} outside 0-20")]
    ThresholdOutOfRange { school_id: u32, value: f64 },
    #[error("school {school_id} sets a threshold for track '{track}' it does not accept")]
    UnknownThresholdTrack { school_id: u32, track: String },
    #[error("unsupported catalog format for {0:?} (expected .json or .csv)")]
    UnsupportedFormat(PathBuf),
}

/// Validated, ordered list of schools. Order is significant: it breaks score ties.
#[derive(Debug, Clone, Default)]
pub struct SchoolCatalog {
    schools: Vec<School>,
}

impl SchoolCatalog {
    pub fn new(schools: Vec<School>) -> Result<Self, CatalogError> {
        validate(&schools)?;
        debug!(schools = schools.len(), "school catalog validated");
        Ok(Self { schools })
    }

    /// Sample catalog shipped with the crate.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json_reader(BUNDLED_CATALOG.as_bytes())
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let schools: Vec<School> = serde_json::from_reader(reader)?;
        Self::new(schools)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let schools = import::parse_schools(reader)?;
        Self::new(schools)
    }

    /// Load an export, picking the parser from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        let reader = || File::open(path).map(BufReader::new);
        let catalog = match extension.as_deref() {
            Some("json") => Self::from_json_reader(reader()?)?,
            Some("csv") => Self::from_csv_reader(reader()?)?,
            _ => return Err(CatalogError::UnsupportedFormat(path.to_path_buf())),
        };

        info!(path = %path.display(), schools = catalog.len(), "loaded school catalog");
        Ok(catalog)
    }

    pub fn schools(&self) -> &[School] {
        &self.schools
    }

    pub fn get(&self, id: u32) -> Option<&School> {
        self.schools.iter().find(|school| school.id == id)
    }

    pub fn len(&self) -> usize {
        self.schools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schools.is_empty()
    }
}

fn validate(schools: &[School]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(schools.len());
    for school in schools {
        if !seen.insert(school.id) {
            return Err(CatalogError::DuplicateId(school.id));
        }
        for value in school.entry_threshold.values() {
            if !value.is_finite() || !(0.0..=GRADE_SCALE_MAX).contains(&value) {
                return Err(CatalogError::ThresholdOutOfRange {
                    school_id: school.id,
                    value,
                });
            }
        }
        if let EntryThreshold::PerTrack(values) = &school.entry_threshold {
            if let Some(track) = values.keys().find(|track| !school.accepts_track(track)) {
                return Err(CatalogError::UnknownThresholdTrack {
                    school_id: school.id,
                    track: track.clone(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_loads_every_threshold_shape() {
        let catalog = SchoolCatalog::bundled().expect("bundled catalog is valid");
        assert!(catalog.len() >= 10);
        let shapes = catalog
            .schools()
            .iter()
            .map(|school| match school.entry_threshold {
                EntryThreshold::Flat(_) => 0,
                EntryThreshold::PerTrack(_) => 1,
                EntryThreshold::Unrestricted => 2,
            })
            .collect::<HashSet<_>>();
        assert_eq!(shapes.len(), 3);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let catalog = SchoolCatalog::bundled().expect("bundled catalog is valid");
        let mut schools = catalog.schools().to_vec();
        let duplicate = schools[0].clone();
        schools.push(duplicate);

        let err = SchoolCatalog::new(schools).expect_err("duplicate ids rejected");
        assert!(matches!(err, CatalogError::DuplicateId(_)));
    }

    #[test]
    fn rejects_thresholds_outside_grade_scale() {
        let catalog = SchoolCatalog::bundled().expect("bundled catalog is valid");
        let mut schools = catalog.schools()[..1].to_vec();
        schools[0].entry_threshold = EntryThreshold::Flat(21.0);

        let err = SchoolCatalog::new(schools).expect_err("21/20 is not a grade");
        match err {
            CatalogError::ThresholdOutOfRange { value, .. } => assert_eq!(value, 21.0),
            other => panic!("expected out of range threshold, got {other:?}"),
        }
    }

    #[test]
    fn rejects_per_track_threshold_for_unaccepted_track() {
        let catalog = SchoolCatalog::bundled().expect("bundled catalog is valid");
        let mut schools = catalog.schools()[..1].to_vec();
        let accepted = schools[0].bac_types[0].clone();
        schools[0].entry_threshold = EntryThreshold::PerTrack(
            [(accepted, 12.0), ("Bac Libre".to_string(), 10.0)]
                .into_iter()
                .collect(),
        );

        let err = SchoolCatalog::new(schools).expect_err("track outside bac_types rejected");
        match err {
            CatalogError::UnknownThresholdTrack { track, .. } => assert_eq!(track, "Bac Libre"),
            other => panic!("expected unknown threshold track, got {other:?}"),
        }
    }

    #[test]
    fn from_path_rejects_unknown_extension() {
        let err = SchoolCatalog::from_path(Path::new("schools.xlsx"))
            .expect_err("xlsx is not supported");
        assert!(matches!(err, CatalogError::UnsupportedFormat(_)));
    }
}
