use crate::{format::html, BookRecord};

/// Whether the capture stream is running.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ScanSession {
    /// No capture is running.
    #[default]
    Inactive,
    /// The scanner is capturing frames and may emit detections.
    Active,
}

/// Ordered, append-only rows of looked up books.
///
/// Rows are never deduplicated: scanning the same book twice shows it twice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResultsTable {
    rows: Vec<BookRecord>,
}

impl ResultsTable {
    /// Appends `book` after the current last row.
    pub fn append(&mut self, book: BookRecord) {
        self.rows.push(book);
    }

    /// All rows, oldest first.
    #[must_use]
    pub fn rows(&self) -> &[BookRecord] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The table body as escaped HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        html::compose_body(&self.rows)
    }
}

/// Everything the page shows, in one place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppState {
    /// Whether the scanner is capturing.
    pub session: ScanSession,
    /// Contents of the ISBN input field: the last decoded code.
    pub isbn_input: String,
    /// Looked up books.
    pub results: ResultsTable,
}

impl AppState {
    /// Whether a scan session is running.
    #[must_use]
    pub fn is_scanning(&self) -> bool {
        self.session == ScanSession::Active
    }
}

#[cfg(test)]
mod tests {
    use super::ResultsTable;
    use crate::BookRecord;

    #[test]
    fn empty_table_has_empty_body() {
        assert_eq!("<tbody></tbody>", ResultsTable::default().to_html());
    }

    #[test]
    fn appended_rows_are_escaped_in_order() {
        let mut table = ResultsTable::default();
        table.append(BookRecord {
            title: "<script>alert(1)</script>".to_owned(),
            ..BookRecord::new("1")
        });
        table.append(BookRecord::new("1"));

        assert_eq!(
            "<tbody>\
             <tr><td>1</td><td>&lt;script&gt;alert(1)&lt;/script&gt;</td><td></td><td></td><td></td></tr>\
             <tr><td>1</td><td></td><td></td><td></td><td></td></tr>\
             </tbody>",
            table.to_html()
        );
    }
}
