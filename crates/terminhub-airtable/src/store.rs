//! The store seam between the HTTP surface and the remote table.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use terminhub_core::{Termin, TerminRecord};

use crate::error::StoreResult;

/// A boxed future for object-safe async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Acknowledgement returned by the store after a delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedRecord {
    pub id: String,
    #[serde(default)]
    pub deleted: bool,
}

/// The record store holding the appointments of record.
///
/// Implementations own all persistence; callers re-query [`list`] for
/// every decision instead of caching results. No conditional-write
/// primitive is exposed, so a check-then-create sequence is not atomic.
///
/// [`list`]: TerminStore::list
pub trait TerminStore: Send + Sync {
    /// Fetches every stored appointment.
    fn list(&self) -> BoxFuture<'_, StoreResult<Vec<TerminRecord>>>;

    /// Persists a normalized appointment, returning the stored record.
    fn create<'a>(&'a self, termin: &'a Termin) -> BoxFuture<'a, StoreResult<TerminRecord>>;

    /// Deletes a record by id.
    fn delete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, StoreResult<DeletedRecord>>;
}
