//! Navigation commands
//!
//! Every user action the browser supports, as data. Commands carry the
//! already-validated catalog entity they act on; the executor does not
//! re-check existence.

use crate::catalog::{Instrument, InstrumentSet, Specialization};

/// A navigation command issued against the session.
#[derive(Debug, Clone)]
pub enum NavCommand {
    /// Open a specialization's set list.
    SelectSpecialization(Specialization),

    /// Open a set's detail view.
    SelectSet(InstrumentSet),

    /// Open an instrument's detail view and resolve its cycle list.
    SelectInstrument(Instrument),

    /// Leave the set list for the specialization overview.
    GoBackToSpecializations,

    /// Leave the set detail for the specialization's set list.
    GoBackToSpecializationSets,

    /// Leave the instrument detail for the set detail.
    GoBackToSetDetail,

    /// Run (or update) a search. An empty query clears the active search.
    Search(String),

    /// Drop the active search and return to the view that preceded it.
    ClearSearch,

    /// Advance to the next instrument in the cycle list, wrapping.
    CycleNext,

    /// Retreat to the previous instrument in the cycle list, wrapping.
    CyclePrevious,
}

impl NavCommand {
    /// Short name for logs and guard messages.
    pub fn name(&self) -> &'static str {
        match self {
            NavCommand::SelectSpecialization(_) => "select_specialization",
            NavCommand::SelectSet(_) => "select_set",
            NavCommand::SelectInstrument(_) => "select_instrument",
            NavCommand::GoBackToSpecializations => "go_back_to_specializations",
            NavCommand::GoBackToSpecializationSets => "go_back_to_specialization_sets",
            NavCommand::GoBackToSetDetail => "go_back_to_set_detail",
            NavCommand::Search(_) => "search",
            NavCommand::ClearSearch => "clear_search",
            NavCommand::CycleNext => "cycle_next",
            NavCommand::CyclePrevious => "cycle_previous",
        }
    }
}
