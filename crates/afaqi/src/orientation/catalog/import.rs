use super::domain::{AdmissionType, EntryThreshold, School, SchoolContact, SchoolStats};
use super::CatalogError;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::io::Read;

const LIST_SEPARATOR: char = '|';
const TRACK_SEPARATOR: char = ';';

pub(crate) fn parse_schools<R: Read>(reader: R) -> Result<Vec<School>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut schools = Vec::new();

    for (index, record) in csv_reader.deserialize::<CatalogRow>().enumerate() {
        let row = record?;
        // header is line 1
        let line = index + 2;
        schools.push(row.into_school(line)?);
    }

    Ok(schools)
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    id: u32,
    name: String,
    city: String,
    #[serde(rename = "type")]
    institution_type: String,
    filiere: String,
    #[serde(default)]
    description: String,
    bac_types: String,
    seuil_entree: String,
    is_public: bool,
    requires_concours: bool,
    admission_type: String,
    #[serde(default)]
    specialties: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    students: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    website: Option<String>,
}

impl CatalogRow {
    fn into_school(self, row: usize) -> Result<School, CatalogError> {
        let entry_threshold = parse_threshold(&self.seuil_entree)
            .map_err(|detail| CatalogError::InvalidRow { row, detail })?;
        let admission_type = parse_admission_type(&self.admission_type)
            .map_err(|detail| CatalogError::InvalidRow { row, detail })?;
        let students = self
            .students
            .as_deref()
            .map(|raw| {
                raw.parse::<u32>().map_err(|_| CatalogError::InvalidRow {
                    row,
                    detail: format!("students '{raw}' is not a whole number"),
                })
            })
            .transpose()?;

        Ok(School {
            id: self.id,
            name: self.name,
            city: self.city,
            institution_type: self.institution_type,
            filiere: self.filiere,
            description: self.description,
            bac_types: split_list(&self.bac_types),
            entry_threshold,
            is_public: self.is_public,
            requires_concours: self.requires_concours,
            admission_type,
            specialties: split_list(&self.specialties),
            programs: Vec::new(),
            stats: SchoolStats {
                students,
                ..SchoolStats::default()
            },
            contact: SchoolContact {
                website: self.website,
                ..SchoolContact::default()
            },
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// `NA`, a bare number, or `track=value` pairs separated by `;`.
fn parse_threshold(raw: &str) -> Result<EntryThreshold, String> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("NA") {
        return Ok(EntryThreshold::Unrestricted);
    }

    if !trimmed.contains('=') {
        return parse_grade(trimmed).map(EntryThreshold::Flat);
    }

    let mut values = BTreeMap::new();
    for pair in trimmed.split(TRACK_SEPARATOR).filter(|pair| !pair.trim().is_empty()) {
        let (track, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("threshold entry '{pair}' must look like track=value"))?;
        values.insert(track.trim().to_string(), parse_grade(value.trim())?);
    }
    Ok(EntryThreshold::PerTrack(values))
}

fn parse_grade(raw: &str) -> Result<f64, String> {
    raw.replace(',', ".")
        .parse::<f64>()
        .map_err(|_| format!("threshold '{raw}' is not a number"))
}

fn parse_admission_type(raw: &str) -> Result<AdmissionType, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "concours" => Ok(AdmissionType::Concours),
        "preselection" | "présélection" => Ok(AdmissionType::Preselection),
        "combined" => Ok(AdmissionType::Combined),
        "direct" => Ok(AdmissionType::Direct),
        other => Err(format!("unknown admission type '{other}'")),
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
