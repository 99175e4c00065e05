//! Catalog Store
//!
//! Owns the authoritative list of instrument sets and instruments for one
//! session and answers membership and lookup queries:
//!
//! - `types`: instrument/set records and the derived specialization shapes
//! - `colors`: the fixed speciality color table and set card accents
//! - `store`: `CatalogStore` with lookups and the specialization derivation
//!
//! Everything here is synchronous and pure; loading lives in `loader`.

mod colors;
mod store;
mod types;

pub use colors::{set_accent_hex, SpecialityColor};
pub use store::CatalogStore;
pub use types::{
    Instrument, InstrumentSet, SetLookup, SpecialityTag, Specialization, SINGLE_INSTRUMENT_SET,
};
