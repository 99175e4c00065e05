//! Core catalog types - instruments, sets, and the derived specialization view
//!
//! Instruments and sets are loaded once and immutable for the session.
//! Specializations are never stored: they are derived from the set
//! collection on demand and must come out identical every time.

use serde::{Deserialize, Serialize};

use super::colors::SpecialityColor;

// =============================================================================
// INSTRUMENT
// =============================================================================

/// A single catalog entry. Field shapes follow the sheet columns; optional
/// columns default to empty rather than failing the row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instrument {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brief: Option<String>,
    pub usage: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub material: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub sterilization: String,
    #[serde(default)]
    pub manufacturer: String,
    /// Names of the sets this instrument belongs to. May be empty, in which
    /// case the instrument is browsed through the "Single Instrument"
    /// pseudo-set.
    #[serde(default)]
    pub sets: Vec<String>,
}

impl Instrument {
    pub fn belongs_to(&self, set_name: &str) -> bool {
        self.sets.iter().any(|s| s == set_name)
    }
}

// =============================================================================
// SET
// =============================================================================

/// A named grouping of instruments.
///
/// `count` is the declared cardinality from the source data. It is
/// display-only and may disagree with the number of instruments whose
/// `sets` list names this set; the discrepancy is preserved, not
/// reconciled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentSet {
    pub name: String,
    pub count: usize,
    #[serde(default)]
    pub has_speciality: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speciality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_description: Option<String>,
}

impl InstrumentSet {
    /// Grouping tag for this set. `has_speciality` is authoritative: a
    /// speciality string on a set flagged `false` is ignored.
    pub fn speciality_tag(&self) -> SpecialityTag {
        if self.has_speciality {
            match &self.speciality {
                Some(name) => SpecialityTag::Named(name.clone()),
                None => SpecialityTag::Others,
            }
        } else {
            SpecialityTag::Others
        }
    }
}

// =============================================================================
// SPECIALITY TAG
// =============================================================================

/// Grouping key for the specialization view. The synthetic bucket for
/// sets without a speciality is a real variant, not a sentinel string.
///
/// Variant order matters: the derived `Ord` sorts `Named` entries
/// lexicographically and keeps `Others` after every named speciality,
/// which is exactly the display order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SpecialityTag {
    Named(String),
    Others,
}

impl SpecialityTag {
    pub fn display_name(&self) -> &str {
        match self {
            SpecialityTag::Named(name) => name,
            SpecialityTag::Others => "Others",
        }
    }

    /// Substring match against the query, case-insensitive. The synthetic
    /// bucket never matches a search.
    pub fn matches_query(&self, needle_lower: &str) -> bool {
        match self {
            SpecialityTag::Named(name) => name.to_lowercase().contains(needle_lower),
            SpecialityTag::Others => false,
        }
    }
}

impl std::fmt::Display for SpecialityTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

// =============================================================================
// SPECIALIZATION - derived, never stored
// =============================================================================

/// One entry of the derived specialization view: a speciality tag, its
/// member sets, the summed declared counts, and the derived color token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Specialization {
    pub tag: SpecialityTag,
    pub sets: Vec<InstrumentSet>,
    pub count: usize,
    pub color: SpecialityColor,
}

impl Specialization {
    /// Empty bucket for a tag, used when a lookup lands on a speciality
    /// with no member sets (e.g. an unknown set name resolving to Others
    /// in a catalog where every set is specialized).
    pub fn empty(tag: SpecialityTag) -> Self {
        let color = SpecialityColor::for_speciality(&tag);
        Specialization {
            tag,
            sets: Vec::new(),
            count: 0,
            color,
        }
    }
}

// =============================================================================
// SET LOOKUP
// =============================================================================

/// Result of resolving a set name against the catalog. Unknown names are a
/// normal condition: the caller gets the "Single Instrument" pseudo-set
/// instead of an error.
#[derive(Debug, Clone)]
pub enum SetLookup {
    Found(InstrumentSet),
    SingleInstrument,
}

/// Display name of the pseudo-set used for instruments with no set
/// membership.
pub const SINGLE_INSTRUMENT_SET: &str = "Single Instrument";

impl SetLookup {
    /// Materialize a set record for display. The pseudo-set is a singleton.
    pub fn into_set(self) -> InstrumentSet {
        match self {
            SetLookup::Found(set) => set,
            SetLookup::SingleInstrument => InstrumentSet {
                name: SINGLE_INSTRUMENT_SET.to_string(),
                count: 1,
                has_speciality: false,
                speciality: None,
                set_description: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speciality_tag_ignores_unflagged_speciality() {
        let set = InstrumentSet {
            name: "Cardiothoracic Basic Tray ".into(),
            count: 29,
            has_speciality: false,
            speciality: Some("Cardiothoracic Surgery".into()),
            set_description: None,
        };
        assert_eq!(set.speciality_tag(), SpecialityTag::Others);
    }

    #[test]
    fn tag_order_keeps_others_last() {
        let mut tags = vec![
            SpecialityTag::Others,
            SpecialityTag::Named("Thoracic Surgery".into()),
            SpecialityTag::Named("Cardiac Surgery".into()),
        ];
        tags.sort();
        assert_eq!(tags[0], SpecialityTag::Named("Cardiac Surgery".into()));
        assert_eq!(tags[1], SpecialityTag::Named("Thoracic Surgery".into()));
        assert_eq!(tags[2], SpecialityTag::Others);
    }

    #[test]
    fn others_never_matches_a_query() {
        assert!(!SpecialityTag::Others.matches_query("other"));
        assert!(SpecialityTag::Named("Cardiac Surgery".into()).matches_query("cardiac"));
    }

    #[test]
    fn unknown_set_resolves_to_singleton_pseudo_set() {
        let set = SetLookup::SingleInstrument.into_set();
        assert_eq!(set.name, SINGLE_INSTRUMENT_SET);
        assert_eq!(set.count, 1);
        assert!(!set.has_speciality);
    }
}
