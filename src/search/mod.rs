//! Search Engine
//!
//! Stateless multi-field substring search over the catalog. One call
//! produces three independent result lists: matching specializations,
//! matching sets, and matching instruments.
//!
//! Matching is case-insensitive substring containment, applied per field;
//! a record matches if any of its searched fields matches. There is no
//! ranking: result order is catalog order, so identical input always
//! yields identical output.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{CatalogStore, Instrument, InstrumentSet, Specialization};

/// The three independent result lists for one query. A record appears at
/// most once per list; the lists do not imply each other (an instrument
/// can match without its owning set matching).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    pub specializations: Vec<Specialization>,
    pub sets: Vec<InstrumentSet>,
    pub instruments: Vec<Instrument>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.specializations.is_empty() && self.sets.is_empty() && self.instruments.is_empty()
    }

    pub fn total(&self) -> usize {
        self.specializations.len() + self.sets.len() + self.instruments.len()
    }
}

/// Search the catalog. An empty or whitespace-only query means "no active
/// search" and returns three empty lists, which callers treat differently
/// from a query with zero matches.
pub fn search(query: &str, catalog: &CatalogStore) -> SearchResults {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return SearchResults::default();
    }

    // Specialization matches reuse the one derivation the store exposes,
    // so membership and color agree with navigation. Each matching entry
    // carries all of its sets.
    let specializations: Vec<Specialization> = catalog
        .specializations_view()
        .into_iter()
        .filter(|spec| spec.tag.matches_query(&needle))
        .collect();

    let sets: Vec<InstrumentSet> = catalog
        .sets()
        .iter()
        .filter(|set| set_matches(set, &needle))
        .cloned()
        .collect();

    let instruments: Vec<Instrument> = catalog
        .instruments()
        .iter()
        .filter(|inst| instrument_matches(inst, &needle))
        .cloned()
        .collect();

    debug!(
        query = %query,
        specializations = specializations.len(),
        sets = sets.len(),
        instruments = instruments.len(),
        "search completed"
    );

    SearchResults {
        specializations,
        sets,
        instruments,
    }
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Searched set fields: name and description.
fn set_matches(set: &InstrumentSet, needle_lower: &str) -> bool {
    contains_ci(&set.name, needle_lower)
        || set
            .set_description
            .as_deref()
            .is_some_and(|d| contains_ci(d, needle_lower))
}

/// Searched instrument fields: name, category, description, brief, usage,
/// any feature, any owning set name.
pub(crate) fn instrument_matches(inst: &Instrument, needle_lower: &str) -> bool {
    contains_ci(&inst.name, needle_lower)
        || contains_ci(&inst.category, needle_lower)
        || contains_ci(&inst.description, needle_lower)
        || inst
            .brief
            .as_deref()
            .is_some_and(|b| contains_ci(b, needle_lower))
        || contains_ci(&inst.usage, needle_lower)
        || inst.features.iter().any(|f| contains_ci(f, needle_lower))
        || inst.sets.iter().any(|s| contains_ci(s, needle_lower))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SpecialityTag;

    fn set(name: &str, speciality: Option<&str>, description: Option<&str>) -> InstrumentSet {
        InstrumentSet {
            name: name.into(),
            count: 5,
            has_speciality: speciality.is_some(),
            speciality: speciality.map(String::from),
            set_description: description.map(String::from),
        }
    }

    fn instrument(name: &str, category: &str, sets: &[&str]) -> Instrument {
        Instrument {
            id: format!("test-{}", name.to_lowercase().replace(' ', "-")),
            name: name.into(),
            category: category.into(),
            description: format!("{name} for test procedures"),
            brief: None,
            usage: "General testing".into(),
            features: vec!["Sharp edge".into()],
            material: "Titanium".into(),
            size: "Standard".into(),
            sterilization: "Autoclave".into(),
            manufacturer: "Various".into(),
            sets: sets.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn sample_catalog() -> CatalogStore {
        CatalogStore::new(
            vec![
                set(
                    "Cardiac - Valve set",
                    Some("Cardiac Surgery"),
                    Some("Used in heart valve surgeries."),
                ),
                set("Lobectomy Set", Some("Thoracic Surgery"), None),
                set("Osteotomy set", None, None),
            ],
            vec![
                instrument("Bone Cutter", "Cutting", &["Osteotomy set"]),
                instrument("Valve Dilator", "Dilation", &["Cardiac - Valve set"]),
                instrument("Duval Lung Forceps", "Grasping", &["Lobectomy Set"]),
            ],
        )
    }

    #[test]
    fn empty_and_whitespace_queries_yield_empty_results() {
        let catalog = sample_catalog();
        assert!(search("", &catalog).is_empty());
        assert!(search("   ", &catalog).is_empty());
        assert!(search("\t\n", &catalog).is_empty());
    }

    #[test]
    fn empty_catalog_yields_empty_results() {
        let catalog = CatalogStore::default();
        assert!(search("cardiac", &catalog).is_empty());
    }

    #[test]
    fn speciality_match_carries_all_member_sets() {
        let catalog = sample_catalog();
        let results = search("cardiac", &catalog);

        assert_eq!(results.specializations.len(), 1);
        let spec = &results.specializations[0];
        assert_eq!(spec.tag, SpecialityTag::Named("Cardiac Surgery".into()));
        assert_eq!(spec.sets.len(), 1);

        // The set also matches by name, independently.
        assert_eq!(results.sets.len(), 1);
        assert_eq!(results.sets[0].name, "Cardiac - Valve set");
    }

    #[test]
    fn set_description_is_searched() {
        let catalog = sample_catalog();
        let results = search("heart valve", &catalog);
        assert_eq!(results.sets.len(), 1);
        assert_eq!(results.sets[0].name, "Cardiac - Valve set");
    }

    #[test]
    fn instrument_matches_on_each_field() {
        let catalog = sample_catalog();

        // name
        assert_eq!(search("bone cutter", &catalog).instruments.len(), 1);
        // category
        assert!(search("grasping", &catalog)
            .instruments
            .iter()
            .any(|i| i.name == "Duval Lung Forceps"));
        // feature
        assert_eq!(search("sharp edge", &catalog).instruments.len(), 3);
        // owning set name
        assert!(search("lobectomy", &catalog)
            .instruments
            .iter()
            .any(|i| i.name == "Duval Lung Forceps"));
    }

    #[test]
    fn material_is_not_a_search_field() {
        let catalog = sample_catalog();
        assert!(search("titanium", &catalog).instruments.is_empty());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let catalog = sample_catalog();
        assert_eq!(
            search("CARDIAC", &catalog).sets.len(),
            search("cardiac", &catalog).sets.len()
        );
    }

    #[test]
    fn no_duplicates_even_when_multiple_fields_match() {
        // "valve" hits name, description, and set membership of the dilator.
        let catalog = sample_catalog();
        let results = search("valve", &catalog);
        let dilators = results
            .instruments
            .iter()
            .filter(|i| i.name == "Valve Dilator")
            .count();
        assert_eq!(dilators, 1);
    }

    #[test]
    fn results_preserve_catalog_order_and_are_deterministic() {
        let catalog = sample_catalog();
        let a = search("set", &catalog);
        let b = search("set", &catalog);
        let names_a: Vec<&str> = a.sets.iter().map(|s| s.name.as_str()).collect();
        let names_b: Vec<&str> = b.sets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names_a, names_b);
        assert_eq!(names_a, vec!["Cardiac - Valve set", "Lobectomy Set", "Osteotomy set"]);
    }
}
