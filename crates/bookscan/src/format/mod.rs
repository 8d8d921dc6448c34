//! Textual representations of [`BookRecord`](crate::BookRecord)s: CSV for the export and
//! escaped HTML for the results table.

pub mod csv;
pub mod html;
