use serde::{Deserialize, Serialize};

/// Metadata describing a single book, keyed by the scanned ISBN.
///
/// Every field is an opaque string supplied by the book sources; a field no source knew
/// about is left empty rather than omitted. Missing fields in incoming JSON deserialize to
/// empty strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookRecord {
    /// The ISBN as it was scanned.
    pub isbn: String,
    /// Title of the book.
    pub title: String,
    /// Authors joined into a single display string.
    pub authors: String,
    /// Publisher name.
    pub publisher: String,
    /// Publication date in whatever format the source uses.
    #[serde(rename = "publishedDate")]
    pub published_date: String,
}

impl BookRecord {
    /// Column names, in the fixed order used by the results table and the CSV export.
    pub const COLUMNS: [&'static str; 5] = ["isbn", "title", "authors", "publisher", "publishedDate"];

    /// Creates a record that only knows its ISBN.
    #[must_use]
    pub fn new<S: Into<String>>(isbn: S) -> Self {
        Self {
            isbn: isbn.into(),
            ..Self::default()
        }
    }

    /// The five cell values in column order.
    #[must_use]
    pub fn cells(&self) -> [&str; 5] {
        [
            &self.isbn,
            &self.title,
            &self.authors,
            &self.publisher,
            &self.published_date,
        ]
    }

    /// Fills every empty metadata field from `other`, leaving fields that already have a
    /// value untouched. The ISBN is never overwritten.
    pub fn fill_missing(&mut self, other: Self) {
        fn fill(field: &mut String, value: String) {
            if field.is_empty() {
                *field = value;
            }
        }

        fill(&mut self.title, other.title);
        fill(&mut self.authors, other.authors);
        fill(&mut self.publisher, other.publisher);
        fill(&mut self.published_date, other.published_date);
    }

    /// Whether no source contributed any metadata beyond the ISBN.
    #[must_use]
    pub fn is_bare(&self) -> bool {
        self.title.is_empty()
            && self.authors.is_empty()
            && self.publisher.is_empty()
            && self.published_date.is_empty()
    }
}
