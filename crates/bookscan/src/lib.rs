#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc
)]
#![warn(missing_docs, rust_2018_idioms)]
#![allow(clippy::module_name_repetitions)]

//! # bookscan
//!
//! bookscan turns scanned ISBN barcodes into a table of book metadata. The [`ui`] module holds
//! the scan-to-table front end, the [`server`] module the HTTP service it talks to, which looks
//! books up across Google Books, Rakuten Books and OpenBD and records them for CSV export.

mod api;
mod book;
mod error;
pub mod format;
pub mod server;
pub mod ui;

pub use book::BookRecord;
pub use error::{Error, ErrorKind};

use log::trace;
use serde::{Deserialize, Serialize};

type Client = reqwest::blocking::Client;

/// JSON body of a lookup request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsbnRequest {
    /// The decoded code, forwarded as-is.
    pub isbn: String,
}

/// Search book metadata by `isbn` across every book source, merging the answers.
///
/// Google Books is asked first, then Rakuten Books (only when `rakuten_app_id` is given), then
/// OpenBD; later sources only fill fields earlier ones left empty.
///
/// # Errors
///
/// An [`Err`] of kind [`ErrorKind::NoValue`] is returned when no source knows the `isbn`.
#[inline]
pub fn book_by_isbn(isbn: &str, rakuten_app_id: Option<&str>) -> Result<BookRecord, Error> {
    trace!("Search book by ISBN of '{isbn}'");
    api::fetch_book_data::<Client>(isbn, rakuten_app_id)
}
