//! The scan-to-table front end.
//!
//! A [`Controller`] owns the [`AppState`] and three collaborators: a [`Scanner`] that turns a
//! capture stream into decoded codes, a [`Lookup`] that resolves a code to a [`BookRecord`]
//! through the server, and a [`Page`] that shows alerts, follows navigation and renders the
//! state. UI input reaches the controller as [`Event`]s through [`Controller::dispatch`].
//!
//! [`BookRecord`]: crate::BookRecord

mod controller;
mod event;
mod lookup;
mod page;
mod scanner;
mod state;

pub use controller::Controller;
pub use event::Event;
pub use lookup::{HttpLookup, Lookup, LookupError, DEFAULT_TIMEOUT};
pub use page::{Page, DOWNLOAD_PATH, SCAN_PATH};
pub use scanner::{Constraints, FacingMode, LineScanner, Reader, Scanner, ScannerConfig};
pub use state::{AppState, ResultsTable, ScanSession};
