use std::sync::{Mutex, MutexGuard, PoisonError};

use log::trace;

use crate::BookRecord;

/// Append-only list of books recorded for export, in the order they were recorded.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Mutex<Vec<BookRecord>>,
}

impl RecordStore {
    /// Appends `record`.
    pub fn push(&self, record: BookRecord) {
        let mut records = self.lock();
        records.push(record);
        trace!("{} record(s) stored", records.len());
    }

    /// A copy of every record.
    #[must_use]
    pub fn snapshot(&self) -> Vec<BookRecord> {
        self.lock().clone()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing was recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock cannot leave the list half-written.
    fn lock(&self) -> MutexGuard<'_, Vec<BookRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
