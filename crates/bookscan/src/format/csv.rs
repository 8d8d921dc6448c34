//! CSV composition for the book export.
//!
//! Output follows RFC 4180: a header row, CRLF line endings, and fields quoted only when they
//! contain a comma, a double quote, or a line break.

use std::borrow::Cow;

use crate::BookRecord;

/// The file name offered to clients downloading the export.
pub const FILE_NAME: &str = "books.csv";

/// The media type of the export.
pub const CONTENT_TYPE: &str = "text/csv";

const LINE_END: &str = "\r\n";

/// Composes `records` into a CSV document with a header row.
#[must_use]
pub fn compose<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a BookRecord>,
{
    let mut out = compose_row(BookRecord::COLUMNS);
    for record in records {
        out.push_str(&compose_row(record.cells()));
    }
    out
}

fn compose_row(cells: [&str; 5]) -> String {
    let mut row = cells.map(quote).join(",");
    row.push_str(LINE_END);
    row
}

fn quote(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
