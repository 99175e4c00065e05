//! Navigation State Machine
//!
//! Tracks where the user is in the catalog and how they got there:
//!
//! - `commands`: `NavCommand` enum with every supported action
//! - `session`: the `Session` state object, `View` enum, banner derivation
//! - `executor`: `NavExecutor` trait executing commands against a session
//!
//! ## Usage Example
//!
//! ```ignore
//! use instrudex::navigation::{NavCommand, NavExecutor, Session};
//!
//! let mut session = Session::new();
//! let spec = catalog.specialization_containing("Ortho Basic Set");
//! session.execute_nav(NavCommand::SelectSpecialization(spec), &catalog);
//! println!("{}", session.banner().title);
//! ```

pub mod commands;
pub mod executor;
pub mod session;

pub use commands::NavCommand;
pub use executor::{NavExecutor, NavResult};
pub use session::{Banner, Session, View};
