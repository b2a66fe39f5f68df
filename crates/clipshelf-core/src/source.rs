//! Document source abstraction.
//!
//! A [`DocumentSource`] hands the engine the current snapshot of one
//! collection. The host owns and refreshes the collection; the engine reads
//! a fresh snapshot at the start of every pass and drops it at the end.

use std::sync::RwLock;

use anyhow::{anyhow, Result};

use crate::models::DocumentRecord;

/// Read side of a clip collection.
///
/// # Contract
///
/// - [`snapshot`](DocumentSource::snapshot) is synchronous and returns the
///   whole collection, in the source's own order. Ties in `last_modified`
///   are displayed in that order.
/// - An `Err` fails the current pass only; the engine leaves the previous
///   output in place.
pub trait DocumentSource {
    /// Identifier of the collection this source reads (e.g. `"WebClips"`).
    fn collection(&self) -> &str;

    /// Read the current collection.
    fn snapshot(&self) -> Result<Vec<DocumentRecord>>;
}

impl<S: DocumentSource + ?Sized> DocumentSource for &S {
    fn collection(&self) -> &str {
        (**self).collection()
    }

    fn snapshot(&self) -> Result<Vec<DocumentRecord>> {
        (**self).snapshot()
    }
}

/// In-memory source for tests and embedders that already hold their records.
///
/// The collection can be replaced between passes with
/// [`set_records`](InMemorySource::set_records), and made to fail with
/// [`set_unavailable`](InMemorySource::set_unavailable).
pub struct InMemorySource {
    collection: String,
    records: RwLock<Option<Vec<DocumentRecord>>>,
}

impl InMemorySource {
    pub fn new(collection: impl Into<String>, records: Vec<DocumentRecord>) -> Self {
        Self {
            collection: collection.into(),
            records: RwLock::new(Some(records)),
        }
    }

    /// Replace the collection contents.
    pub fn set_records(&self, records: Vec<DocumentRecord>) {
        if let Ok(mut guard) = self.records.write() {
            *guard = Some(records);
        }
    }

    /// Make subsequent snapshots fail until `set_records` is called again.
    pub fn set_unavailable(&self) {
        if let Ok(mut guard) = self.records.write() {
            *guard = None;
        }
    }
}

impl DocumentSource for InMemorySource {
    fn collection(&self) -> &str {
        &self.collection
    }

    fn snapshot(&self) -> Result<Vec<DocumentRecord>> {
        let guard = self
            .records
            .read()
            .map_err(|_| anyhow!("collection '{}' lock poisoned", self.collection))?;
        guard
            .clone()
            .ok_or_else(|| anyhow!("collection '{}' is unavailable", self.collection))
    }
}
