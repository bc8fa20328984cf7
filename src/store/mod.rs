//! Record store abstraction.
//!
//! The core treats the backing document store as an external collaborator:
//! an append-mostly table of `{id, text, embedding, metadata}` records
//! supporting batch insert and filtered scan. Any JSON-document database
//! can sit behind this trait; [`MemoryStore`] is the shipped in-process
//! implementation.

pub mod memory;

pub use memory::MemoryStore;

use crate::error::Result;
use crate::types::EmbeddedRecord;
use crate::vector::{Where, WhereDocument};

/// Backing document store for embedded records.
///
/// Implementations decide their own consistency and duplicate-id policy;
/// the core neither dedups nor retries. Store failures surface as
/// [`Error::Store`](crate::Error::Store) and propagate to the caller
/// unmodified.
pub trait RecordStore: Send + Sync {
    /// Insert a batch of records into a named collection.
    fn insert_many(&self, collection: &str, records: Vec<EmbeddedRecord>) -> Result<()>;

    /// Return all records in a named collection matching the filters, as a
    /// materialized sequence in insertion order. A missing collection is an
    /// empty one.
    fn scan(
        &self,
        collection: &str,
        r#where: Option<&Where>,
        where_document: Option<&WhereDocument>,
    ) -> Result<Vec<EmbeddedRecord>>;

    /// Number of records in a named collection.
    fn count(&self, collection: &str) -> usize;
}
