use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::vector::Embedding;

/// A metadata field value.
///
/// Metadata is an open key/value bag attached to each record (category,
/// source, timestamps, ...). The core never interprets it beyond equality
/// checks at query time. Serialized untagged so it round-trips against
/// plain JSON documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl From<&str> for MetadataValue {
    fn from(v: &str) -> Self {
        MetadataValue::Str(v.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(v: String) -> Self {
        MetadataValue::Str(v)
    }
}

impl From<i64> for MetadataValue {
    fn from(v: i64) -> Self {
        MetadataValue::Int(v)
    }
}

impl From<f64> for MetadataValue {
    fn from(v: f64) -> Self {
        MetadataValue::Float(v)
    }
}

impl From<bool> for MetadataValue {
    fn from(v: bool) -> Self {
        MetadataValue::Bool(v)
    }
}

/// Record metadata: string keys to scalar values, deterministic iteration order.
pub type Metadata = BTreeMap<String, MetadataValue>;

/// The unit of storage: a document's text, its vector representation, and
/// caller-supplied metadata.
///
/// `embedding` is optional because the backing collection may hold records
/// written by producers that never embed; such records are skipped when
/// ranking (they cannot be scored).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedRecord {
    /// Unique id, the primary key in the record store.
    #[serde(rename = "_id")]
    pub id: String,

    /// Original document content, verbatim. Empty for raw-vector inserts.
    pub text: String,

    /// The vector representation, `d` floats.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Embedding>,

    /// Open metadata mapping, opaque to the core.
    #[serde(default)]
    pub metadata: Metadata,
}

impl EmbeddedRecord {
    /// Create a record with a fresh UUID v4 id.
    pub fn new(text: String, embedding: Embedding, metadata: Metadata) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text,
            embedding: Some(embedding),
            metadata,
        }
    }

    /// Create a record with a caller-supplied id.
    pub fn with_id(id: String, text: String, embedding: Embedding, metadata: Metadata) -> Self {
        Self {
            id,
            text,
            embedding: Some(embedding),
            metadata,
        }
    }

    /// Whether this record can participate in similarity ranking.
    pub fn has_embedding(&self) -> bool {
        self.embedding.is_some()
    }
}
