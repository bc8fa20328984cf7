//! The embedding-indexed collection: batch writes and top-k similarity queries.

use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use super::distance::cosine_distance;
use super::types::{AddRequest, Embedding, QueryRequest, QueryResponse};
use crate::embed::EmbeddingFunction;
use crate::error::{Error, Result};
use crate::store::RecordStore;
use crate::types::{EmbeddedRecord, Metadata};

/// A named partition of embedded records with a bound record store and an
/// optional embedding function.
///
/// Queries are brute-force O(N·d) scans over the filtered candidate set:
/// exact nearest neighbors, no index to build or maintain. That is a
/// deliberate trade for the target corpus size (thousands to low millions
/// of records); a caller needing more scale swaps the [`RecordStore`]
/// behind the same contract.
///
/// The collection holds no mutable state of its own: handles are cheap,
/// and concurrent `add`/`query` calls are as safe as the store makes them.
/// A query racing an add may or may not observe the in-flight records.
pub struct VectorCollection {
    name: String,
    store: Arc<dyn RecordStore>,
    embedder: Option<Arc<dyn EmbeddingFunction>>,
}

impl std::fmt::Debug for VectorCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorCollection")
            .field("name", &self.name)
            .field("has_embedder", &self.embedder.is_some())
            .finish()
    }
}

impl VectorCollection {
    pub(crate) fn new(
        name: String,
        store: Arc<dyn RecordStore>,
        embedder: Option<Arc<dyn EmbeddingFunction>>,
    ) -> Self {
        Self {
            name,
            store,
            embedder,
        }
    }

    /// Collection name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of records currently stored.
    pub fn count(&self) -> usize {
        self.store.count(&self.name)
    }

    /// Register documents and/or raw vectors in the collection.
    ///
    /// If `embeddings` is omitted, each document is embedded by the bound
    /// embedding function, one call per document in input order. Omitted
    /// `ids` are generated (UUID v4), omitted `metadatas` default to empty
    /// maps, and omitted `documents` (raw-vector insert) leave `text` empty.
    /// All records land in the store as one batch write and are visible to
    /// subsequent queries immediately.
    ///
    /// Returns the ids written, in input order. Repeated ids are not
    /// deduplicated here; update-vs-insert policy belongs to the store.
    pub fn add(&self, request: AddRequest) -> Result<Vec<String>> {
        let AddRequest {
            documents,
            embeddings,
            metadatas,
            ids,
        } = request;

        let embeddings = match (embeddings, documents.as_ref()) {
            (None, None) => {
                return Err(Error::InvalidArgument(
                    "either documents or embeddings must be provided".to_string(),
                ));
            }
            (Some(embeddings), Some(documents)) if documents.len() != embeddings.len() => {
                return Err(Error::InvalidArgument(format!(
                    "documents and embeddings must have equal lengths (got {} and {})",
                    documents.len(),
                    embeddings.len()
                )));
            }
            (Some(embeddings), _) => embeddings,
            (None, Some(documents)) => {
                let embedder = self.require_embedder()?;
                documents
                    .iter()
                    .map(|doc| embedder.embed(doc))
                    .collect::<Result<Vec<Embedding>>>()?
            }
        };

        let count = embeddings.len();

        let documents = match documents {
            Some(documents) => documents,
            None => vec![String::new(); count],
        };

        let ids = match ids {
            Some(ids) => {
                if ids.len() != count {
                    return Err(Error::InvalidArgument(format!(
                        "ids length {} does not match record count {}",
                        ids.len(),
                        count
                    )));
                }
                ids
            }
            None => (0..count).map(|_| Uuid::new_v4().to_string()).collect(),
        };

        let metadatas = match metadatas {
            Some(metadatas) => {
                if metadatas.len() != count {
                    return Err(Error::InvalidArgument(format!(
                        "metadatas length {} does not match record count {}",
                        metadatas.len(),
                        count
                    )));
                }
                metadatas
            }
            None => vec![Metadata::new(); count],
        };

        let records: Vec<EmbeddedRecord> = ids
            .iter()
            .zip(documents)
            .zip(embeddings)
            .zip(metadatas)
            .map(|(((id, text), embedding), metadata)| {
                EmbeddedRecord::with_id(id.clone(), text, embedding, metadata)
            })
            .collect();

        debug!(collection = %self.name, count, "add");
        self.store.insert_many(&self.name, records)?;

        Ok(ids)
    }

    /// Return the `n_results` most similar stored records for each query,
    /// ranked by ascending cosine distance.
    ///
    /// Candidates are filtered by `where` (metadata equality) and
    /// `where_document` (content contains) before ranking; records without
    /// an embedding are skipped. Ties sort by insertion order, so identical
    /// queries against an unmodified collection return identical rankings.
    /// An empty candidate set yields empty sequences, not an error.
    pub fn query(&self, request: QueryRequest) -> Result<QueryResponse> {
        let query_embeddings = match (&request.query_texts, request.query_embeddings) {
            (Some(texts), _) => {
                let embedder = self.require_embedder()?;
                texts
                    .iter()
                    .map(|text| embedder.embed_query(text))
                    .collect::<Result<Vec<Embedding>>>()?
            }
            (None, Some(embeddings)) => embeddings,
            (None, None) => {
                return Err(Error::InvalidArgument(
                    "either query_texts or query_embeddings must be provided".to_string(),
                ));
            }
        };

        let candidates = self.store.scan(
            &self.name,
            request.r#where.as_ref(),
            request.where_document.as_ref(),
        )?;

        debug!(
            collection = %self.name,
            queries = query_embeddings.len(),
            candidates = candidates.len(),
            n_results = request.n_results,
            "query"
        );

        let mut response = QueryResponse::default();

        for query in &query_embeddings {
            let mut ranked: Vec<(&EmbeddedRecord, f32)> = candidates
                .iter()
                .filter_map(|record| {
                    record
                        .embedding
                        .as_ref()
                        .map(|v| (record, cosine_distance(query, v)))
                })
                .collect();

            // Stable sort keeps insertion order on ties.
            ranked.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
            ranked.truncate(request.n_results);

            response
                .ids
                .push(ranked.iter().map(|(r, _)| r.id.clone()).collect());
            response
                .distances
                .push(ranked.iter().map(|(_, d)| *d).collect());
            response
                .documents
                .push(ranked.iter().map(|(r, _)| r.text.clone()).collect());
            response
                .metadatas
                .push(ranked.iter().map(|(r, _)| r.metadata.clone()).collect());
        }

        Ok(response)
    }

    fn require_embedder(&self) -> Result<&Arc<dyn EmbeddingFunction>> {
        self.embedder.as_ref().ok_or_else(|| {
            Error::MissingDependency("no embedding function provided".to_string())
        })
    }
}
