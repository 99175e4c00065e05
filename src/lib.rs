//! Instrudex - surgical instrument catalog browser core
//!
//! An in-memory catalog of surgical instruments grouped into sets grouped
//! into specializations, with multi-field substring search and a
//! navigation state machine that preserves "where did I come from"
//! context.
//!
//! ## Architecture
//! One flow for search: query -> search engine -> three result lists.
//! One loop for navigation: command -> session transition -> new view.
//! Both lean on the same specialization derivation in the catalog store,
//! so grouping and color can never disagree between them.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use instrudex::navigation::{NavCommand, NavExecutor, Session};
//!
//! let catalog = instrudex::loader::load_bundled().expect("bundled catalog");
//! let mut session = Session::new();
//! let spec = catalog.specialization_containing("Ortho Basic Set");
//! session.execute_nav(NavCommand::SelectSpecialization(spec), &catalog);
//! println!("{}", session.banner().title);
//! ```

// Core error handling
pub mod error;

// Catalog store: sets, instruments, derived specializations and colors
pub mod catalog;

// Stateless multi-field search
pub mod search;

// Navigation state machine
pub mod navigation;

// Bundled / directory / remote catalog loading
pub mod loader;

// Public re-exports for the common path
pub use catalog::{
    set_accent_hex, CatalogStore, Instrument, InstrumentSet, SetLookup, SpecialityColor,
    SpecialityTag, Specialization, SINGLE_INSTRUMENT_SET,
};
pub use error::{CatalogError, LoadError};
pub use navigation::{Banner, NavCommand, NavExecutor, NavResult, Session, View};
pub use search::{search, SearchResults};
