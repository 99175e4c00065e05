//! Browse Flow Test
//!
//! Drives the navigation state machine end-to-end over the bundled
//! catalog: the full forward walk, cycling, back transitions, and the
//! search detour with its one-slot history.

use instrudex::catalog::SpecialityColor;
use instrudex::loader::load_bundled;
use instrudex::navigation::{NavCommand, NavExecutor, NavResult, Session, View};

#[test]
fn full_walk_down_and_back_up_the_hierarchy() {
    let catalog = load_bundled().unwrap();
    let mut session = Session::new();
    assert_eq!(session.current_view(), View::Specializations);

    // Down: specialization -> set -> instrument.
    let ortho = catalog.specialization_containing("Ortho Basic Set");
    session.execute_nav(NavCommand::SelectSpecialization(ortho), &catalog);
    assert_eq!(session.current_view(), View::SpecializationSets);
    assert_eq!(session.active_color(), SpecialityColor::Teal);
    assert_eq!(session.banner().title, "Orthopedic Surgery");

    let set = catalog.set_by_name("Ortho Basic Set").unwrap().clone();
    session.execute_nav(NavCommand::SelectSet(set), &catalog);
    assert_eq!(session.current_view(), View::SetDetail);
    // Banner shows the declared count, not the actual membership.
    assert_eq!(session.banner().subtitle, "21 instruments in this set");

    let mallet = catalog.instrument_by_name("Mallet").unwrap().clone();
    session.execute_nav(NavCommand::SelectInstrument(mallet), &catalog);
    assert_eq!(session.current_view(), View::InstrumentDetail);
    assert_eq!(session.cycle_list().len(), 5);
    assert_eq!(session.cycle_index(), 1);
    assert_eq!(session.banner().subtitle, "Mallet \u{2022} 2 of 5");

    // Up: each back transition clears exactly what its forward set.
    session.execute_nav(NavCommand::GoBackToSetDetail, &catalog);
    assert_eq!(session.current_view(), View::SetDetail);
    assert!(session.selected_instrument().is_none());
    assert!(session.cycle_list().is_empty());
    assert_eq!(session.selected_set().unwrap().name, "Ortho Basic Set");

    session.execute_nav(NavCommand::GoBackToSpecializationSets, &catalog);
    assert_eq!(session.current_view(), View::SpecializationSets);
    assert!(session.selected_set().is_none());
    assert_eq!(session.active_color(), SpecialityColor::Teal);

    session.execute_nav(NavCommand::GoBackToSpecializations, &catalog);
    assert_eq!(session.current_view(), View::Specializations);
    assert!(session.selected_specialization().is_none());
    assert_eq!(session.active_color(), SpecialityColor::Gray);
}

#[test]
fn selecting_a_search_hit_builds_the_cycle_from_its_first_set() {
    let catalog = load_bundled().unwrap();
    let mut session = Session::new();

    session.execute_nav(NavCommand::Search("bone".into()), &catalog);
    assert_eq!(session.current_view(), View::SearchResults);

    // No set is selected, so the instrument's first set provides the
    // cycle context.
    let elevator = catalog
        .instrument_by_name("Periosteal Elevator")
        .unwrap()
        .clone();
    session.execute_nav(NavCommand::SelectInstrument(elevator), &catalog);

    assert_eq!(session.current_view(), View::InstrumentDetail);
    assert_eq!(session.selected_set().unwrap().name, "Ortho Basic Set");

    let expected: Vec<String> = catalog
        .instruments_in_set("Ortho Basic Set")
        .iter()
        .map(|i| i.name.clone())
        .collect();
    let cycle: Vec<String> = session.cycle_list().iter().map(|i| i.name.clone()).collect();
    assert_eq!(cycle, expected);
    assert_eq!(session.cycle_index(), 3);

    // Opening the instrument ended the search.
    assert!(session.search_query().is_empty());
    assert!(session.search_results().is_none());
}

#[test]
fn cycling_wraps_and_round_trips() {
    let catalog = load_bundled().unwrap();
    let mut session = Session::new();

    session.execute_nav(NavCommand::Search("bone cutter".into()), &catalog);
    let cutter = catalog.instrument_by_name("Bone Cutter").unwrap().clone();
    session.execute_nav(NavCommand::SelectInstrument(cutter), &catalog);

    let len = session.cycle_list().len();
    let origin = session.cycle_index();

    // A full lap lands back where it started.
    for _ in 0..len {
        let result = session.execute_nav(NavCommand::CycleNext, &catalog);
        assert!(matches!(result, NavResult::CycleMoved { .. }));
    }
    assert_eq!(session.cycle_index(), origin);

    // Previous from index 0 wraps to the end.
    let result = session.execute_nav(NavCommand::CyclePrevious, &catalog);
    assert_eq!(
        result,
        NavResult::CycleMoved {
            index: len - 1,
            len
        }
    );
}

#[test]
fn search_detour_restores_the_preceding_view() {
    let catalog = load_bundled().unwrap();
    let mut session = Session::new();

    let general = catalog.specialization_containing("Laparoscopy set");
    session.execute_nav(NavCommand::SelectSpecialization(general), &catalog);
    let set = catalog.set_by_name("Laparoscopy set").unwrap().clone();
    session.execute_nav(NavCommand::SelectSet(set), &catalog);

    let result = session.execute_nav(NavCommand::Search("trocar".into()), &catalog);
    assert!(matches!(result, NavResult::SearchUpdated { total } if total > 0));
    assert_eq!(session.current_view(), View::SearchResults);
    assert!(session.banner().title.ends_with("Search Results"));

    let result = session.execute_nav(NavCommand::ClearSearch, &catalog);
    assert_eq!(
        result,
        NavResult::SearchCleared {
            restored: View::SetDetail
        }
    );
    assert_eq!(session.current_view(), View::SetDetail);
    assert_eq!(session.selected_set().unwrap().name, "Laparoscopy set");
}

#[test]
fn instrument_with_no_sets_browses_as_a_singleton() {
    let catalog = load_bundled().unwrap();
    let mut session = Session::new();

    session.execute_nav(NavCommand::Search("speculum".into()), &catalog);
    let speculum = catalog.instrument_by_name("Graves Speculum").unwrap().clone();
    session.execute_nav(NavCommand::SelectInstrument(speculum), &catalog);

    assert_eq!(session.selected_set().unwrap().name, "Single Instrument");
    assert_eq!(session.cycle_list().len(), 1);

    // Cycling a singleton stays put.
    session.execute_nav(NavCommand::CycleNext, &catalog);
    assert_eq!(session.cycle_index(), 0);
    assert_eq!(
        session.selected_instrument().unwrap().name,
        "Graves Speculum"
    );
}
