//! Session state for one browsing session
//!
//! One explicit state object owned by the caller, mutated only through
//! the executor. There is exactly one of everything: one current view,
//! one selection per level, one cycle list, one memoized search, and a
//! single-slot "previous view" for leaving search - not a history stack.

use serde::{Deserialize, Serialize};

use crate::catalog::{Instrument, InstrumentSet, SpecialityColor, Specialization};
use crate::search::SearchResults;

/// The enumerated view modes of the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum View {
    Specializations,
    SpecializationSets,
    SetDetail,
    InstrumentDetail,
    SearchResults,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Specializations => "Surgical Specializations",
            View::SpecializationSets => "Specialization Sets",
            View::SetDetail => "Set Details",
            View::InstrumentDetail => "Instrument",
            View::SearchResults => "Search Results",
        }
    }
}

/// Banner text derived from the current state, so the presentation layer
/// reads one struct instead of re-deriving counts and names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub title: String,
    pub subtitle: String,
}

/// Mutable state of one browsing session. Starts at the specialization
/// overview with no selections and no active search. Fields are only
/// mutated by the executor so transitions stay atomic.
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) view: View,
    pub(crate) selected_specialization: Option<Specialization>,
    pub(crate) selected_set: Option<InstrumentSet>,
    pub(crate) selected_instrument: Option<Instrument>,
    pub(crate) cycle: Vec<Instrument>,
    pub(crate) cycle_index: usize,
    pub(crate) search_query: String,
    pub(crate) search_results: Option<SearchResults>,
    pub(crate) previous_view: Option<View>,
    pub(crate) active_color: SpecialityColor,
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Session {
            view: View::Specializations,
            selected_specialization: None,
            selected_set: None,
            selected_instrument: None,
            cycle: Vec::new(),
            cycle_index: 0,
            search_query: String::new(),
            search_results: None,
            previous_view: None,
            active_color: SpecialityColor::Gray,
        }
    }

    pub fn current_view(&self) -> View {
        self.view
    }

    pub fn selected_specialization(&self) -> Option<&Specialization> {
        self.selected_specialization.as_ref()
    }

    pub fn selected_set(&self) -> Option<&InstrumentSet> {
        self.selected_set.as_ref()
    }

    pub fn selected_instrument(&self) -> Option<&Instrument> {
        self.selected_instrument.as_ref()
    }

    /// The ordered list of instruments next/previous cycles through.
    pub fn cycle_list(&self) -> &[Instrument] {
        &self.cycle
    }

    pub fn cycle_index(&self) -> usize {
        self.cycle_index
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn search_results(&self) -> Option<&SearchResults> {
        self.search_results.as_ref()
    }

    /// Banner color for the current specialization context.
    pub fn active_color(&self) -> SpecialityColor {
        self.active_color
    }

    /// Derive the banner for the current view.
    pub fn banner(&self) -> Banner {
        match self.view {
            View::SearchResults => {
                let total = self.search_results.as_ref().map(|r| r.total()).unwrap_or(0);
                Banner {
                    title: format!("{total} Search Results"),
                    subtitle: format!("Found {total} matches for \"{}\"", self.search_query),
                }
            }
            View::Specializations => Banner {
                title: View::Specializations.title().to_string(),
                subtitle: "Browse surgical sets by specialization".to_string(),
            },
            View::SpecializationSets => match &self.selected_specialization {
                Some(spec) => Banner {
                    title: spec.tag.display_name().to_string(),
                    subtitle: format!(
                        "{} sets \u{2022} {} instruments",
                        spec.sets.len(),
                        spec.count
                    ),
                },
                None => Banner {
                    title: View::SpecializationSets.title().to_string(),
                    subtitle: String::new(),
                },
            },
            View::SetDetail => match &self.selected_set {
                Some(set) => Banner {
                    title: set.name.clone(),
                    subtitle: format!("{} instruments in this set", set.count),
                },
                None => Banner {
                    title: View::SetDetail.title().to_string(),
                    subtitle: String::new(),
                },
            },
            View::InstrumentDetail => {
                let title = self
                    .selected_set
                    .as_ref()
                    .map(|set| set.name.clone())
                    .unwrap_or_else(|| View::SetDetail.title().to_string());
                let subtitle = match &self.selected_instrument {
                    Some(inst) => format!(
                        "{} \u{2022} {} of {}",
                        inst.name,
                        self.cycle_index + 1,
                        self.cycle.len()
                    ),
                    None => String::new(),
                };
                Banner { title, subtitle }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_starts_at_the_overview() {
        let session = Session::new();
        assert_eq!(session.current_view(), View::Specializations);
        assert!(session.selected_set().is_none());
        assert!(session.cycle_list().is_empty());
        assert_eq!(session.active_color(), SpecialityColor::Gray);
        assert_eq!(session.banner().title, "Surgical Specializations");
    }
}
