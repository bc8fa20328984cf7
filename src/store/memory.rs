//! In-process record store.

use dashmap::DashMap;
use std::collections::HashMap;
use tracing::debug;

use crate::error::Result;
use crate::store::RecordStore;
use crate::types::EmbeddedRecord;
use crate::vector::{Where, WhereDocument};

/// One named collection: records in insertion order plus an id -> slot map
/// for constant-time upserts.
#[derive(Default)]
struct Partition {
    records: Vec<EmbeddedRecord>,
    slots: HashMap<String, usize>,
}

impl Partition {
    /// Upsert by id, preserving the original slot on replacement.
    fn upsert(&mut self, record: EmbeddedRecord) {
        match self.slots.get(&record.id) {
            Some(&slot) => self.records[slot] = record,
            None => {
                self.slots.insert(record.id.clone(), self.records.len());
                self.records.push(record);
            }
        }
    }
}

/// In-memory record store backed by a concurrent map of named partitions.
///
/// Records live in insertion order inside each partition, so scans (and
/// therefore ranking tie-breaks) are reproducible. `id` is treated as a
/// natural key: re-inserting an existing id replaces the record in place,
/// keeping its original position.
///
/// Suitable for corpora in the thousands-to-low-millions range; for anything
/// beyond that, put a real document database behind [`RecordStore`].
#[derive(Default)]
pub struct MemoryStore {
    collections: DashMap<String, Partition>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// List collection names with record counts.
    pub fn list_collections(&self) -> Vec<(String, usize)> {
        self.collections
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().records.len()))
            .collect()
    }
}

impl RecordStore for MemoryStore {
    fn insert_many(&self, collection: &str, records: Vec<EmbeddedRecord>) -> Result<()> {
        let inserted = records.len();
        let mut partition = self.collections.entry(collection.to_string()).or_default();

        for record in records {
            partition.upsert(record);
        }

        debug!(
            collection,
            inserted,
            total = partition.records.len(),
            "insert_many"
        );
        Ok(())
    }

    fn scan(
        &self,
        collection: &str,
        r#where: Option<&Where>,
        where_document: Option<&WhereDocument>,
    ) -> Result<Vec<EmbeddedRecord>> {
        let Some(partition) = self.collections.get(collection) else {
            return Ok(Vec::new());
        };

        Ok(partition
            .records
            .iter()
            .filter(|record| r#where.map_or(true, |w| w.matches(&record.metadata)))
            .filter(|record| where_document.map_or(true, |w| w.matches(&record.text)))
            .cloned()
            .collect())
    }

    fn count(&self, collection: &str) -> usize {
        self.collections
            .get(collection)
            .map_or(0, |p| p.records.len())
    }
}
