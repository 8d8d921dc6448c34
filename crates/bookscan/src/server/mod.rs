//! HTTP service resolving scanned ISBNs and exporting what was recorded.
//!
//! | Route                    | Behaviour                                              |
//! |--------------------------|--------------------------------------------------------|
//! | `GET /`                  | HTML page listing recorded books                       |
//! | `POST /scan`             | look up `{isbn}`, record it, answer with the record    |
//! | `POST /fetch_book_info`  | look up `{isbn}` without recording                     |
//! | `POST /commit_book_info` | record the posted book as-is                           |
//! | `GET /download`          | recorded books as a CSV attachment                     |

mod error;
mod routes;
mod store;

use std::sync::Arc;

use log::info;
use tokio::net::TcpListener;

pub use error::ApiError;
pub use routes::create_router;
pub use store::RecordStore;

use crate::{BookRecord, Error, ErrorKind};

/// Somewhere book metadata can be looked up. Lookups block and are run off the async runtime.
pub trait BookSource: Send + Sync + 'static {
    /// Looks up `isbn`.
    ///
    /// # Errors
    ///
    /// An [`Err`] of kind [`ErrorKind::NoValue`] is returned when the book is unknown.
    fn fetch(&self, isbn: &str) -> Result<BookRecord, Error>;
}

/// [`BookSource`] backed by the public book APIs, see [`crate::book_by_isbn`].
#[derive(Clone, Debug, Default)]
pub struct ApiBookSource {
    rakuten_app_id: Option<String>,
}

impl ApiBookSource {
    /// Creates a source; Rakuten Books is only asked when an application id is given.
    #[must_use]
    pub fn new(rakuten_app_id: Option<String>) -> Self {
        Self { rakuten_app_id }
    }
}

impl BookSource for ApiBookSource {
    fn fetch(&self, isbn: &str) -> Result<BookRecord, Error> {
        crate::book_by_isbn(isbn, self.rakuten_app_id.as_deref())
    }
}

/// Shared state of every request handler.
#[derive(Clone)]
pub struct ServerState {
    source: Arc<dyn BookSource>,
    store: Arc<RecordStore>,
}

impl ServerState {
    /// Creates state with an empty record store.
    pub fn new<S: BookSource>(source: S) -> Self {
        Self {
            source: Arc::new(source),
            store: Arc::new(RecordStore::default()),
        }
    }

    /// The records collected so far.
    #[must_use]
    pub fn store(&self) -> &RecordStore {
        &self.store
    }
}

/// Serves the routes of [`create_router`] on `listener` until the process ends.
///
/// # Errors
///
/// An [`Err`] is returned when the listener fails.
pub async fn serve(listener: TcpListener, state: ServerState) -> Result<(), Error> {
    if let Ok(addr) = listener.local_addr() {
        info!("Listening on http://{addr}");
    }
    axum::serve(listener, create_router(state))
        .await
        .map_err(|e| Error::wrap(ErrorKind::IO, e))
}
