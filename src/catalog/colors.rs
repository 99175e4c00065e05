//! Color derivation for specializations and set cards
//!
//! Colors are derived, never stored: one fixed table maps speciality names
//! to tokens, with gray as the fallback for anything unmapped. The same
//! name must yield the same token for the whole session, since the UI
//! banner re-derives it on every transition.

use serde::{Deserialize, Serialize};

use super::types::SpecialityTag;

/// Color token for a specialization banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialityColor {
    Teal,
    Coral,
    Sky,
    Sage,
    Orange,
    Purple,
    Amber,
    Gray,
}

impl SpecialityColor {
    /// Derive the token for a speciality tag. Total function: unmapped
    /// names and the Others bucket both yield `Gray`.
    pub fn for_speciality(tag: &SpecialityTag) -> Self {
        match tag {
            SpecialityTag::Named(name) => match name.as_str() {
                "Orthopedic Surgery" => SpecialityColor::Teal,
                "General Anesthesia" => SpecialityColor::Coral,
                "General Surgery" => SpecialityColor::Sky,
                "Cardiothoracic Surgery" => SpecialityColor::Sage,
                "Cardiac Surgery" => SpecialityColor::Sage,
                "Neurosurgery" => SpecialityColor::Orange,
                "ENT Surgery" => SpecialityColor::Purple,
                "Thoracic Surgery" => SpecialityColor::Amber,
                _ => SpecialityColor::Gray,
            },
            SpecialityTag::Others => SpecialityColor::Gray,
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            SpecialityColor::Teal => "#4ECDC4",
            SpecialityColor::Coral => "#FF6B6B",
            SpecialityColor::Sky => "#45B7D1",
            SpecialityColor::Sage => "#96CEB4",
            SpecialityColor::Orange => "#F39C12",
            SpecialityColor::Purple => "#9B59B6",
            SpecialityColor::Amber => "#E67E22",
            SpecialityColor::Gray => "#95A5A6",
        }
    }
}

impl Default for SpecialityColor {
    fn default() -> Self {
        SpecialityColor::Gray
    }
}

/// Accent color for a set card, keyed on name fragments. Purely cosmetic;
/// unmatched names get the neutral accent.
pub fn set_accent_hex(set_name: &str) -> &'static str {
    if set_name.contains("Cardiac") || set_name.contains("Cardiothoracic") {
        "#FF6B6B"
    } else if set_name.contains("Ortho") {
        "#4ECDC4"
    } else if set_name.contains("Laparoscopy") {
        "#45B7D1"
    } else if set_name.contains("Spinal") {
        "#96CEB4"
    } else if set_name.contains("Hand") {
        "#FFEAA7"
    } else if set_name.contains("Thyroid") {
        "#DDA0DD"
    } else if set_name.contains("Tracheostomy") {
        "#98D8C8"
    } else if set_name.contains("Thoracotomy") {
        "#F7DC6F"
    } else if set_name.contains("Osteotomy") {
        "#BB8FCE"
    } else if set_name.contains("Incision") {
        "#85C1E9"
    } else if set_name.contains("Appendisectomy") {
        "#F8C471"
    } else if set_name.contains("Lobectomy") {
        "#82E0AA"
    } else if set_name.contains("Single") {
        "#F1948A"
    } else {
        "#D5DBDB"
    }
}
