//! Navigation command executor
//!
//! Executes commands against a `Session`. Transitions apply atomically in
//! the order issued; there is a single caller, so no interleaving is
//! possible.
//!
//! Invalid transitions (a command issued from a view it is not defined
//! for) are programmer errors. They are logged loudly and ignored with an
//! explicit `Ignored` result; existence of the entities carried by a
//! command was validated by the caller and is not re-checked here.

use tracing::debug;

use super::commands::NavCommand;
use super::session::{Session, View};
use crate::catalog::{CatalogStore, Instrument, InstrumentSet, SetLookup, SpecialityColor};
use crate::search::search;

// =============================================================================
// NAVIGATION RESULT
// =============================================================================

/// Outcome of executing one navigation command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavResult {
    /// The view changed (selection transitions and back transitions).
    ViewChanged { view: View },

    /// The cycle position moved.
    CycleMoved { index: usize, len: usize },

    /// A search ran (or was re-read from the memo).
    SearchUpdated { total: usize },

    /// The active search was dropped and the prior view restored.
    SearchCleared { restored: View },

    /// The command was not valid in the current view and was ignored.
    Ignored { reason: String },
}

// =============================================================================
// EXECUTOR
// =============================================================================

/// Trait for executing navigation commands against session state.
///
/// The catalog is passed per call: the session owns no catalog data, only
/// selection state, so the one derivation in `CatalogStore` stays the
/// single source of truth for grouping and color.
pub trait NavExecutor {
    fn execute_nav(&mut self, cmd: NavCommand, catalog: &CatalogStore) -> NavResult;
}

impl NavExecutor for Session {
    fn execute_nav(&mut self, cmd: NavCommand, catalog: &CatalogStore) -> NavResult {
        debug!(command = cmd.name(), view = ?self.view, "executing");
        match cmd {
            NavCommand::SelectSpecialization(spec) => {
                if let Some(ignored) = self.guard(
                    "select_specialization",
                    &[View::Specializations, View::SearchResults],
                ) {
                    return ignored;
                }
                self.active_color = spec.color;
                self.selected_specialization = Some(spec);
                // Entering a specialization resets the levels below it.
                self.selected_set = None;
                self.selected_instrument = None;
                self.cycle.clear();
                self.cycle_index = 0;
                self.drop_search_if_leaving_results();
                self.view = View::SpecializationSets;
                NavResult::ViewChanged { view: self.view }
            }

            NavCommand::SelectSet(set) => {
                if let Some(ignored) = self.guard(
                    "select_set",
                    &[
                        View::SpecializationSets,
                        View::SetDetail,
                        View::SearchResults,
                        View::InstrumentDetail,
                    ],
                ) {
                    return ignored;
                }
                // Color context is recomputed from the catalog, not taken
                // from the current specialization: a set reached through
                // search or a badge tap may belong elsewhere.
                self.active_color = catalog.specialization_containing(&set.name).color;
                self.selected_set = Some(set);
                self.selected_instrument = None;
                self.cycle.clear();
                self.cycle_index = 0;
                self.drop_search_if_leaving_results();
                self.view = View::SetDetail;
                NavResult::ViewChanged { view: self.view }
            }

            NavCommand::SelectInstrument(instrument) => {
                if let Some(ignored) = self.guard(
                    "select_instrument",
                    &[View::SetDetail, View::SearchResults, View::InstrumentDetail],
                ) {
                    return ignored;
                }
                self.resolve_cycle_context(&instrument, catalog);
                self.cycle_index = self
                    .cycle
                    .iter()
                    .position(|i| i.name == instrument.name)
                    .unwrap_or(0);
                self.selected_instrument = Some(instrument);
                // Opening an instrument always ends the active search.
                self.search_query.clear();
                self.search_results = None;
                self.previous_view = None;
                self.view = View::InstrumentDetail;
                NavResult::ViewChanged { view: self.view }
            }

            NavCommand::GoBackToSpecializations => {
                if let Some(ignored) =
                    self.guard("go_back_to_specializations", &[View::SpecializationSets])
                {
                    return ignored;
                }
                self.selected_specialization = None;
                self.active_color = SpecialityColor::Gray;
                self.view = View::Specializations;
                NavResult::ViewChanged { view: self.view }
            }

            NavCommand::GoBackToSpecializationSets => {
                if let Some(ignored) =
                    self.guard("go_back_to_specialization_sets", &[View::SetDetail])
                {
                    return ignored;
                }
                self.selected_set = None;
                self.active_color = self
                    .selected_specialization
                    .as_ref()
                    .map(|spec| spec.color)
                    .unwrap_or(SpecialityColor::Gray);
                self.view = View::SpecializationSets;
                NavResult::ViewChanged { view: self.view }
            }

            NavCommand::GoBackToSetDetail => {
                if let Some(ignored) = self.guard("go_back_to_set_detail", &[View::InstrumentDetail])
                {
                    return ignored;
                }
                self.selected_instrument = None;
                self.cycle.clear();
                self.cycle_index = 0;
                self.view = View::SetDetail;
                NavResult::ViewChanged { view: self.view }
            }

            NavCommand::Search(query) => {
                // An empty query means "no active search", not a search
                // with zero matches.
                if query.trim().is_empty() {
                    if self.view == View::SearchResults {
                        return self.restore_previous_view();
                    }
                    return NavResult::SearchUpdated { total: 0 };
                }

                if self.view != View::SearchResults {
                    self.previous_view = Some(self.view);
                    self.view = View::SearchResults;
                }
                // Memoized: identical consecutive queries reuse the stored
                // results.
                if self.search_query != query || self.search_results.is_none() {
                    self.search_results = Some(search(&query, catalog));
                    self.search_query = query;
                }
                let total = self.search_results.as_ref().map(|r| r.total()).unwrap_or(0);
                NavResult::SearchUpdated { total }
            }

            NavCommand::ClearSearch => {
                if let Some(ignored) = self.guard("clear_search", &[View::SearchResults]) {
                    return ignored;
                }
                self.restore_previous_view()
            }

            NavCommand::CycleNext => self.cycle_by(1),
            NavCommand::CyclePrevious => self.cycle_by(-1),
        }
    }
}

impl Session {
    /// Returns `Some(Ignored)` when the current view is not one of the
    /// allowed source views for the command. Logged at error level in
    /// debug builds so development fails loudly, warn level in release.
    fn guard(&self, command: &str, allowed: &[View]) -> Option<NavResult> {
        if allowed.contains(&self.view) {
            return None;
        }
        let reason = format!("{command} is not valid from {:?}", self.view);
        if cfg!(debug_assertions) {
            tracing::error!(command, view = ?self.view, "invalid transition ignored");
        } else {
            tracing::warn!(command, view = ?self.view, "invalid transition ignored");
        }
        Some(NavResult::Ignored { reason })
    }

    /// Resolve the cycle context for an instrument being opened.
    ///
    /// Precedence: the already-selected set wins; otherwise the first of
    /// the instrument's own sets; otherwise the instrument alone under the
    /// "Single Instrument" pseudo-set.
    fn resolve_cycle_context(&mut self, instrument: &Instrument, catalog: &CatalogStore) {
        if let Some(set) = &self.selected_set {
            self.cycle = clone_members(catalog, &set.name);
            return;
        }

        if let Some(first_set_name) = instrument.sets.first() {
            let members = clone_members(catalog, first_set_name);
            self.selected_set = Some(match catalog.lookup_set(first_set_name) {
                SetLookup::Found(set) => set,
                // The name is not in the overview table; show it anyway
                // with the actual member count, the only count we have.
                SetLookup::SingleInstrument => InstrumentSet {
                    name: first_set_name.clone(),
                    count: members.len(),
                    has_speciality: false,
                    speciality: None,
                    set_description: None,
                },
            });
            self.cycle = members;
            return;
        }

        self.selected_set = Some(SetLookup::SingleInstrument.into_set());
        self.cycle = vec![instrument.clone()];
    }

    fn cycle_by(&mut self, step: isize) -> NavResult {
        if let Some(ignored) = self.guard("cycle", &[View::InstrumentDetail]) {
            return ignored;
        }
        let len = self.cycle.len();
        if len == 0 {
            return NavResult::Ignored {
                reason: "cycle list is empty".to_string(),
            };
        }
        // Circular wrap in both directions.
        self.cycle_index = (self.cycle_index as isize + step).rem_euclid(len as isize) as usize;
        self.selected_instrument = Some(self.cycle[self.cycle_index].clone());
        NavResult::CycleMoved {
            index: self.cycle_index,
            len,
        }
    }

    fn restore_previous_view(&mut self) -> NavResult {
        let restored = self.previous_view.take().unwrap_or(View::Specializations);
        self.search_query.clear();
        self.search_results = None;
        self.view = restored;
        NavResult::SearchCleared { restored }
    }

    /// Selecting something out of the search results leaves the search
    /// behind entirely, so the target view is actually reached.
    fn drop_search_if_leaving_results(&mut self) {
        if self.view == View::SearchResults {
            self.search_query.clear();
            self.search_results = None;
            self.previous_view = None;
        }
    }
}

/// Owned copies of a set's members, in catalog order.
fn clone_members(catalog: &CatalogStore, set_name: &str) -> Vec<Instrument> {
    catalog
        .instruments_in_set(set_name)
        .into_iter()
        .cloned()
        .collect()
}
