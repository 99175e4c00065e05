//! Bundled Catalog Test
//!
//! Exercises the catalog store and search engine against the data assets
//! shipped with the crate: the specialization derivation, the declared
//! count semantics, and representative searches.

use instrudex::catalog::{SpecialityColor, SpecialityTag};
use instrudex::loader::load_bundled;
use instrudex::search::search;

#[test]
fn specializations_view_over_the_bundled_sets() {
    let catalog = load_bundled().unwrap();
    let view = catalog.specializations_view();

    let names: Vec<&str> = view.iter().map(|s| s.tag.display_name()).collect();
    assert_eq!(
        names,
        vec![
            "Cardiac Surgery",
            "General Anesthesia",
            "General Surgery",
            "Orthopedic Surgery",
            "Thoracic Surgery",
            "Others",
        ]
    );

    // Partition: every set exactly once.
    let grouped: usize = view.iter().map(|s| s.sets.len()).sum();
    assert_eq!(grouped, catalog.sets().len());

    // Thoracic Surgery holds the Lobectomy Set; the unspecialized
    // Osteotomy set lands in Others, which comes last regardless of name.
    let thoracic = view
        .iter()
        .find(|s| s.tag == SpecialityTag::Named("Thoracic Surgery".into()))
        .unwrap();
    assert!(thoracic.sets.iter().any(|s| s.name == "Lobectomy Set"));
    assert_eq!(thoracic.color, SpecialityColor::Amber);

    let others = view.last().unwrap();
    assert_eq!(others.tag, SpecialityTag::Others);
    assert!(others.sets.iter().any(|s| s.name == "Osteotomy set"));
    assert_eq!(others.color, SpecialityColor::Gray);
}

#[test]
fn declared_counts_are_preserved_not_reconciled() {
    let catalog = load_bundled().unwrap();

    // The overview table declares 21 instruments for the Ortho Basic Set;
    // the bundled roster carries fewer. Both numbers are correct answers
    // to different questions.
    let set = catalog.set_by_name("Ortho Basic Set").unwrap();
    assert_eq!(set.count, 21);

    let members = catalog.instruments_in_set("Ortho Basic Set");
    assert_eq!(members.len(), 5);
    assert_ne!(set.count, members.len());
}

#[test]
fn searching_cardiac_finds_the_specialization_and_the_valve_set() {
    let catalog = load_bundled().unwrap();
    let results = search("cardiac", &catalog);

    let spec_names: Vec<&str> = results
        .specializations
        .iter()
        .map(|s| s.tag.display_name())
        .collect();
    assert_eq!(spec_names, vec!["Cardiac Surgery"]);
    // The matching specialization carries all of its sets.
    assert_eq!(results.specializations[0].sets.len(), 1);

    let set_names: Vec<&str> = results.sets.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(set_names, vec!["Cardiac - Valve set"]);

    // Members of the valve set match through their set-name field.
    for name in ["Valve Dilator", "Atrial Retractor", "Valve Scissors"] {
        assert!(
            results.instruments.iter().any(|i| i.name == name),
            "expected {name} in instrument results"
        );
    }
}

#[test]
fn search_results_are_independent_lists() {
    let catalog = load_bundled().unwrap();

    // "forceps" matches instruments but no speciality and no set.
    let results = search("forceps", &catalog);
    assert!(results.specializations.is_empty());
    assert!(results.sets.is_empty());
    assert!(results.instruments.iter().any(|i| i.name == "Babcock Forceps"));

    // "anesthesia" matches a speciality without matching any set name.
    let results = search("anesthesia", &catalog);
    assert_eq!(results.specializations.len(), 1);
    assert!(results.sets.is_empty());
}

#[test]
fn whitespace_query_is_no_search_at_all() {
    let catalog = load_bundled().unwrap();
    let results = search("  \t ", &catalog);
    assert!(results.is_empty());
    assert_eq!(results.total(), 0);
}
