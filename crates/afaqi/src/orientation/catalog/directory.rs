use super::domain::{EntryThreshold, School};
use serde::{Deserialize, Serialize};

/// Bounds and step of the directory's minimum-threshold slider.
pub const THRESHOLD_SLIDER: (f64, f64, f64) = (10.0, 20.0, 0.5);

/// Criteria for browsing the directory. Every `None` criterion matches all schools.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectoryFilter {
    #[serde(default)]
    pub filiere: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub bac_type: Option<String>,
    #[serde(default)]
    pub institution_type: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub min_threshold: Option<f64>,
}

impl DirectoryFilter {
    pub fn matches(&self, school: &School) -> bool {
        let filiere = matches_text(&self.filiere, &school.filiere);
        let city = matches_text(&self.city, &school.city);
        let institution_type = matches_text(&self.institution_type, &school.institution_type);
        let bac_type = self
            .bac_type
            .as_deref()
            .map_or(true, |track| track.is_empty() || school.accepts_track(track));
        let specialty = self.specialty.as_deref().map_or(true, |wanted| {
            wanted.is_empty() || school.specialties.iter().any(|s| s == wanted)
        });
        let threshold = self
            .min_threshold
            .map_or(true, |min| clears_minimum(&school.entry_threshold, min));

        filiere && city && institution_type && bac_type && specialty && threshold
    }

    pub fn apply<'a>(&self, schools: &'a [School]) -> Vec<&'a School> {
        schools.iter().filter(|school| self.matches(school)).collect()
    }
}

fn matches_text(wanted: &Option<String>, actual: &str) -> bool {
    match wanted.as_deref() {
        None | Some("") => true,
        Some(value) => value == actual,
    }
}

// Open schools always show; per-track schools are judged on their hardest bar.
fn clears_minimum(threshold: &EntryThreshold, min: f64) -> bool {
    match threshold {
        EntryThreshold::Unrestricted => true,
        other => other.highest().map_or(false, |value| value >= min),
    }
}

/// Distinct values offered by the directory's select boxes, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DirectoryFacets {
    pub filieres: Vec<String>,
    pub cities: Vec<String>,
    pub bac_types: Vec<String>,
    pub institution_types: Vec<String>,
}

impl DirectoryFacets {
    pub fn collect(schools: &[School]) -> Self {
        let mut facets = Self::default();
        for school in schools {
            push_unique(&mut facets.filieres, &school.filiere);
            push_unique(&mut facets.cities, &school.city);
            for track in &school.bac_types {
                push_unique(&mut facets.bac_types, track);
            }
            push_unique(&mut facets.institution_types, &school.institution_type);
        }
        facets
    }
}

fn push_unique(values: &mut Vec<String>, candidate: &str) {
    if !values.iter().any(|value| value == candidate) {
        values.push(candidate.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::catalog::SchoolCatalog;

    fn catalog() -> SchoolCatalog {
        SchoolCatalog::bundled().expect("bundled catalog is valid")
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let catalog = catalog();
        let filtered = DirectoryFilter::default().apply(catalog.schools());
        assert_eq!(filtered.len(), catalog.len());
    }

    #[test]
    fn combines_city_and_filiere() {
        let catalog = catalog();
        let filter = DirectoryFilter {
            city: Some("Rabat".to_string()),
            filiere: Some("Ingénierie".to_string()),
            ..DirectoryFilter::default()
        };

        let filtered = filter.apply(catalog.schools());

        assert!(!filtered.is_empty());
        assert!(filtered
            .iter()
            .all(|school| school.city == "Rabat" && school.filiere == "Ingénierie"));
    }

    #[test]
    fn minimum_threshold_keeps_open_schools() {
        let catalog = catalog();
        let filter = DirectoryFilter {
            min_threshold: Some(THRESHOLD_SLIDER.1),
            ..DirectoryFilter::default()
        };

        let filtered = filter.apply(catalog.schools());

        assert!(filtered
            .iter()
            .all(|school| school.entry_threshold.is_unrestricted()));
        assert!(!filtered.is_empty());
    }

    #[test]
    fn per_track_school_passes_on_its_hardest_bar() {
        let mut tracks = std::collections::BTreeMap::new();
        tracks.insert("Sciences Mathématiques A".to_string(), 12.0);
        tracks.insert("Sciences Physiques".to_string(), 15.0);
        let threshold = EntryThreshold::PerTrack(tracks);

        assert!(clears_minimum(&threshold, 14.5));
        assert!(!clears_minimum(&threshold, 15.5));
    }

    #[test]
    fn facets_are_distinct_and_ordered() {
        let catalog = catalog();
        let facets = DirectoryFacets::collect(catalog.schools());

        assert_eq!(facets.cities[0], catalog.schools()[0].city);
        let distinct = facets
            .cities
            .iter()
            .collect::<std::collections::HashSet<_>>();
        assert_eq!(distinct.len(), facets.cities.len());
        assert!(facets.bac_types.len() <= 7);
    }
}
