use log::{info, trace, warn};
use serde::de::DeserializeOwned;

use crate::{BookRecord, Error, ErrorKind};

pub(crate) mod google_books;
pub(crate) mod openbd;
pub(crate) mod rakuten;

pub trait Client
where
    Self: Default,
{
    fn get_json<T>(&self, url: &str) -> Result<T, Error>
    where
        T: DeserializeOwned;
}

impl Client for reqwest::blocking::Client {
    fn get_json<T>(&self, url: &str) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        self.get(url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(Error::from)
            .and_then(|r| r.json().map_err(|e| Error::wrap(ErrorKind::Deserialize, e)))
    }
}

/// Looks up `isbn` against every book source and merges the answers.
///
/// Sources are asked in order Google Books, Rakuten Books, OpenBD; a later source only fills
/// fields that are still empty. A failing source is logged and skipped. Rakuten is skipped
/// when no application id is given.
///
/// Fails with [`ErrorKind::NoValue`] when the sources that answered know nothing about the
/// ISBN. When no source answered at all, the first source error is returned instead.
pub(crate) fn fetch_book_data<C: Client>(
    isbn: &str,
    rakuten_app_id: Option<&str>,
) -> Result<BookRecord, Error> {
    // remove hypen from ISBN-13 (if applicable)
    let query = isbn.replace('-', "");
    let client = C::default();
    let mut merge = Merge::new(isbn);

    merge.source("Google Books", google_books::get_book(&client, &query));

    if let Some(app_id) = rakuten_app_id {
        merge.source(
            "Rakuten Books",
            rakuten::get_book(&client, &query, app_id),
        );
    } else {
        trace!("No Rakuten application id configured - skipping Rakuten Books");
    }

    merge.source("OpenBD", openbd::get_book(&client, &query));

    merge.finish()
}

/// Answers of the book sources gathered into one record.
struct Merge {
    record: BookRecord,
    answered: bool,
    first_failure: Option<Error>,
}

impl Merge {
    fn new(isbn: &str) -> Self {
        Self {
            record: BookRecord::new(isbn),
            answered: false,
            first_failure: None,
        }
    }

    fn source(&mut self, name: &str, found: Result<Option<BookRecord>, Error>) {
        let isbn = &self.record.isbn;
        match found {
            Ok(Some(book)) => {
                info!("{name} has an entry for ISBN '{isbn}'");
                self.answered = true;
                self.record.fill_missing(book);
            }
            Ok(None) => {
                trace!("{name} has no entry for ISBN '{isbn}'");
                self.answered = true;
            }
            Err(err) => {
                warn!("{name} lookup failed for ISBN '{isbn}': {err}");
                self.first_failure.get_or_insert(err);
            }
        }
    }

    fn finish(self) -> Result<BookRecord, Error> {
        match self.first_failure {
            Some(err) if !self.answered => Err(err),
            _ if self.record.is_bare() => Err(Error::new(
                ErrorKind::NoValue,
                format!("No book found for ISBN '{}'", self.record.isbn),
            )),
            _ => Ok(self.record),
        }
    }
}

#[cfg(test)]
pub(crate) use test::{assert_url, impl_text_producer, MockClient, NetworkErrorProducer, Producer, URL_SINK};
