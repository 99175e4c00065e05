//! CatalogStore - owns the loaded sets and instruments
//!
//! The store is read-only after construction. Membership queries filter
//! the instrument list linearly; the specialization view is derived fresh
//! on every call so that search and navigation can never disagree about
//! grouping or color.

use std::collections::BTreeMap;

use tracing::debug;

use super::colors::SpecialityColor;
use super::types::{Instrument, InstrumentSet, SetLookup, SpecialityTag, Specialization};

/// Authoritative in-memory catalog for one session.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    sets: Vec<InstrumentSet>,
    instruments: Vec<Instrument>,
}

impl CatalogStore {
    pub fn new(sets: Vec<InstrumentSet>, instruments: Vec<Instrument>) -> Self {
        debug!(
            sets = sets.len(),
            instruments = instruments.len(),
            "catalog constructed"
        );
        CatalogStore { sets, instruments }
    }

    pub fn sets(&self) -> &[InstrumentSet] {
        &self.sets
    }

    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    /// Exact-name set lookup. Unknown names return `None`; callers decide
    /// the fallback.
    pub fn set_by_name(&self, name: &str) -> Option<&InstrumentSet> {
        self.sets.iter().find(|s| s.name == name)
    }

    /// Set lookup with the standard fallback applied: unknown names resolve
    /// to the "Single Instrument" pseudo-set.
    pub fn lookup_set(&self, name: &str) -> SetLookup {
        match self.set_by_name(name) {
            Some(set) => SetLookup::Found(set.clone()),
            None => SetLookup::SingleInstrument,
        }
    }

    /// Exact-name instrument lookup.
    pub fn instrument_by_name(&self, name: &str) -> Option<&Instrument> {
        self.instruments.iter().find(|i| i.name == name)
    }

    /// All instruments whose `sets` list names `set_name`, in catalog order.
    /// Linear in the instrument count.
    pub fn instruments_in_set(&self, set_name: &str) -> Vec<&Instrument> {
        self.instruments
            .iter()
            .filter(|i| i.belongs_to(set_name))
            .collect()
    }

    /// Derive the specialization view: one entry per distinct speciality
    /// plus the Others bucket, sorted ascending by name with Others forced
    /// last. Every set lands in exactly one entry.
    pub fn specializations_view(&self) -> Vec<Specialization> {
        // BTreeMap keyed on the tag gives the display order directly:
        // SpecialityTag's derived Ord sorts named entries lexicographically
        // and keeps Others after all of them.
        let mut groups: BTreeMap<SpecialityTag, Vec<InstrumentSet>> = BTreeMap::new();
        for set in &self.sets {
            groups.entry(set.speciality_tag()).or_default().push(set.clone());
        }

        groups
            .into_iter()
            .map(|(tag, sets)| {
                let count = sets.iter().map(|s| s.count).sum();
                let color = SpecialityColor::for_speciality(&tag);
                Specialization {
                    tag,
                    sets,
                    count,
                    color,
                }
            })
            .collect()
    }

    /// The specialization entry that contains `set_name`. Unknown set names
    /// resolve to the Others bucket. Always consistent with
    /// `specializations_view`: the answer is found inside a fresh full
    /// derivation, never computed by a second code path.
    pub fn specialization_containing(&self, set_name: &str) -> Specialization {
        let tag = match self.set_by_name(set_name) {
            Some(set) => set.speciality_tag(),
            None => SpecialityTag::Others,
        };
        self.specializations_view()
            .into_iter()
            .find(|spec| spec.tag == tag)
            .unwrap_or_else(|| Specialization::empty(tag))
    }
}
