//! Request, response, and filter types for the vector collection API.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{Metadata, MetadataValue};

/// A vector embedding (array of f32 values).
pub type Embedding = Vec<f32>;

/// Equality filter over record metadata.
///
/// A record matches only if every key/value pair here equals the
/// corresponding metadata field. Records missing a filtered key never match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Where {
    pub fields: BTreeMap<String, MetadataValue>,
}

impl Where {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field == value`.
    pub fn eq(mut self, field: &str, value: impl Into<MetadataValue>) -> Self {
        self.fields.insert(field.to_string(), value.into());
        self
    }

    /// Check a record's metadata against this filter.
    pub fn matches(&self, metadata: &Metadata) -> bool {
        self.fields
            .iter()
            .all(|(field, expected)| metadata.get(field) == Some(expected))
    }
}

/// Content filter over record text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhereDocument {
    /// Case-insensitive substring match.
    Contains(String),
}

impl WhereDocument {
    /// Check a record's text against this filter.
    pub fn matches(&self, text: &str) -> bool {
        match self {
            WhereDocument::Contains(needle) => {
                text.to_lowercase().contains(&needle.to_lowercase())
            }
        }
    }
}

/// Inputs to [`VectorCollection::add`](crate::vector::VectorCollection::add).
///
/// At least one of `documents` or `embeddings` must be supplied; the other
/// parallel sequences are optional and defaulted per record.
#[derive(Debug, Clone, Default)]
pub struct AddRequest {
    pub documents: Option<Vec<String>>,
    pub embeddings: Option<Vec<Embedding>>,
    pub metadatas: Option<Vec<Metadata>>,
    pub ids: Option<Vec<String>>,
}

impl AddRequest {
    /// Add documents, embedded via the collection's embedding function.
    pub fn documents<I, S>(documents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            documents: Some(documents.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    /// Add raw vectors with no source text.
    pub fn embeddings<I>(embeddings: I) -> Self
    where
        I: IntoIterator<Item = Embedding>,
    {
        Self {
            embeddings: Some(embeddings.into_iter().collect()),
            ..Default::default()
        }
    }

    /// Supply pre-computed embeddings alongside the documents.
    pub fn with_embeddings<I>(mut self, embeddings: I) -> Self
    where
        I: IntoIterator<Item = Embedding>,
    {
        self.embeddings = Some(embeddings.into_iter().collect());
        self
    }

    /// Attach one metadata mapping per record.
    pub fn with_metadatas<I>(mut self, metadatas: I) -> Self
    where
        I: IntoIterator<Item = Metadata>,
    {
        self.metadatas = Some(metadatas.into_iter().collect());
        self
    }

    /// Use caller-supplied ids instead of generated ones.
    pub fn with_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }
}

/// Inputs to [`VectorCollection::query`](crate::vector::VectorCollection::query).
#[derive(Debug, Clone)]
pub struct QueryRequest {
    pub query_texts: Option<Vec<String>>,
    pub query_embeddings: Option<Vec<Embedding>>,
    /// Maximum matches per query. Default 10.
    pub n_results: usize,
    pub r#where: Option<Where>,
    pub where_document: Option<WhereDocument>,
}

impl Default for QueryRequest {
    fn default() -> Self {
        Self {
            query_texts: None,
            query_embeddings: None,
            n_results: 10,
            r#where: None,
            where_document: None,
        }
    }
}

impl QueryRequest {
    /// Query by text, embedded via the collection's embedding function.
    pub fn texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            query_texts: Some(texts.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    /// Query by raw vectors.
    pub fn embeddings<I>(embeddings: I) -> Self
    where
        I: IntoIterator<Item = Embedding>,
    {
        Self {
            query_embeddings: Some(embeddings.into_iter().collect()),
            ..Default::default()
        }
    }

    /// Set the maximum number of matches per query.
    pub fn with_n_results(mut self, n_results: usize) -> Self {
        self.n_results = n_results;
        self
    }

    /// Restrict candidates by metadata equality.
    pub fn with_where(mut self, r#where: Where) -> Self {
        self.r#where = Some(r#where);
        self
    }

    /// Restrict candidates by document content.
    pub fn with_where_document(mut self, filter: WhereDocument) -> Self {
        self.where_document = Some(filter);
        self
    }
}

/// Ranked results, one inner sequence per input query.
///
/// The four sequences are parallel: element `i` of each corresponds to
/// query `i`, and within a query the inner sequences share rank order
/// (most similar first).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResponse {
    pub ids: Vec<Vec<String>>,
    pub distances: Vec<Vec<f32>>,
    pub documents: Vec<Vec<String>>,
    pub metadatas: Vec<Vec<Metadata>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_where_matches_equality() {
        let mut meta = Metadata::new();
        meta.insert("category".to_string(), "nfl".into());
        meta.insert("season".to_string(), MetadataValue::Int(2024));

        assert!(Where::new().eq("category", "nfl").matches(&meta));
        assert!(Where::new()
            .eq("category", "nfl")
            .eq("season", 2024i64)
            .matches(&meta));
        assert!(!Where::new().eq("category", "nba").matches(&meta));
        assert!(!Where::new().eq("missing", "x").matches(&meta));
    }

    #[test]
    fn test_empty_where_matches_everything() {
        assert!(Where::new().matches(&Metadata::new()));
    }

    #[test]
    fn test_where_document_contains_case_insensitive() {
        let filter = WhereDocument::Contains("Mammal".to_string());
        assert!(filter.matches("cats are MAMMALS"));
        assert!(!filter.matches("tuna is a fish"));
    }
}
