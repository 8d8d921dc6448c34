use std::{fmt, time::Duration};

use log::{info, trace};
use reqwest::StatusCode;

use crate::{BookRecord, Error, ErrorKind, IsbnRequest};

use super::SCAN_PATH;

/// How long [`HttpLookup`] waits for the server before giving up.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolves a decoded code to book metadata.
pub trait Lookup {
    /// Looks up `isbn`.
    ///
    /// # Errors
    ///
    /// An [`Err`] is returned when the book is unknown or the lookup could not be completed.
    fn lookup(&self, isbn: &str) -> Result<BookRecord, LookupError>;
}

/// Why a lookup failed, in the granularity the user is told about.
#[derive(Debug)]
pub enum LookupError {
    /// The server answered but knows no book with this ISBN.
    NotFound,
    /// The server could not be reached or did not answer in time.
    Unreachable(Error),
    /// The server answered with a non-success status other than not found.
    Rejected(u16),
    /// The server answered successfully but the body was not a book record.
    Malformed(Error),
}

impl LookupError {
    /// The message shown to the user for this failure.
    #[must_use]
    pub const fn alert_message(&self) -> &'static str {
        match self {
            LookupError::NotFound => "No book information was found for this ISBN",
            LookupError::Unreachable(_) => "The server could not be reached",
            LookupError::Rejected(_) | LookupError::Malformed(_) => {
                "Failed to fetch book information"
            }
        }
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::NotFound => f.write_str("book not found"),
            LookupError::Unreachable(err) => write!(f, "server unreachable: {err}"),
            LookupError::Rejected(status) => write!(f, "server responded with status {status}"),
            LookupError::Malformed(err) => write!(f, "malformed response: {err}"),
        }
    }
}

impl std::error::Error for LookupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LookupError::Unreachable(err) | LookupError::Malformed(err) => Some(err),
            LookupError::NotFound | LookupError::Rejected(_) => None,
        }
    }
}

/// [`Lookup`] posting the ISBN as JSON to the server's scan endpoint.
#[derive(Debug)]
pub struct HttpLookup {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpLookup {
    /// Creates a lookup against the server at `base_url`, e.g. `http://127.0.0.1:5000`.
    ///
    /// # Errors
    ///
    /// An [`Err`] is returned when the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        let url = format!("{}{SCAN_PATH}", base_url.trim_end_matches('/'));
        trace!("Lookups go to '{url}' with a timeout of {timeout:?}");
        Ok(Self { client, url })
    }

    /// The full URL lookups are posted to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Lookup for HttpLookup {
    fn lookup(&self, isbn: &str) -> Result<BookRecord, LookupError> {
        info!("Looking up ISBN '{isbn}' at '{}'", self.url);
        let resp = self
            .client
            .post(&self.url)
            .json(&IsbnRequest {
                isbn: isbn.to_owned(),
            })
            .send()
            .map_err(|e| LookupError::Unreachable(e.into()))?;

        match resp.status() {
            StatusCode::NOT_FOUND => Err(LookupError::NotFound),
            status if !status.is_success() => Err(LookupError::Rejected(status.as_u16())),
            _ => resp.json().map_err(|e| {
                if e.is_timeout() {
                    LookupError::Unreachable(e.into())
                } else {
                    LookupError::Malformed(Error::wrap(ErrorKind::Deserialize, e))
                }
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{HttpLookup, LookupError, DEFAULT_TIMEOUT};
    use crate::{Error, ErrorKind};

    #[test]
    fn scan_url_joins_base_without_double_slash() {
        let lookup = HttpLookup::new("http://127.0.0.1:5000/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!("http://127.0.0.1:5000/scan", lookup.url());
    }

    #[test]
    fn not_found_and_unreachable_have_distinct_messages() {
        let not_found = LookupError::NotFound.alert_message();
        let unreachable =
            LookupError::Unreachable(Error::new(ErrorKind::IO, "refused")).alert_message();
        let rejected = LookupError::Rejected(500).alert_message();

        assert_ne!(not_found, unreachable);
        assert_ne!(not_found, rejected);
        assert_ne!(unreachable, rejected);
    }
}
