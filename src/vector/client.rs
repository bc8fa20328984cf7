//! Client factory: binds a record store and embedding function, hands out
//! collections by name.

use std::sync::Arc;
use tracing::debug;

use super::collection::VectorCollection;
use crate::embed::EmbeddingFunction;
use crate::error::{Error, Result};
use crate::store::RecordStore;

/// Owns the record-store connection and the embedding function; issues
/// [`VectorCollection`]s. Stateless beyond those two bindings: many
/// collections may be obtained from one client, and repeated calls with the
/// same name return equivalent handles over the same underlying partition.
pub struct VectorClient {
    store: Arc<dyn RecordStore>,
    embedder: Option<Arc<dyn EmbeddingFunction>>,
}

impl VectorClient {
    /// Create a client over a record store, with no embedding function.
    /// Collections from such a client only accept raw-vector operations.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            embedder: None,
        }
    }

    /// Bind an embedding function, enabling text-based add and query.
    pub fn with_embedding_function(mut self, embedder: Arc<dyn EmbeddingFunction>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Get a collection handle by name, creating the partition lazily on
    /// first write. The only validation is name non-emptiness.
    pub fn get_or_create_collection(&self, name: &str) -> Result<VectorCollection> {
        if name.is_empty() {
            return Err(Error::InvalidArgument(
                "collection name must not be empty".to_string(),
            ));
        }

        debug!(collection = name, "get_or_create_collection");
        Ok(VectorCollection::new(
            name.to_string(),
            Arc::clone(&self.store),
            self.embedder.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::MockEmbedder;
    use crate::store::MemoryStore;
    use crate::vector::{AddRequest, QueryRequest};

    #[test]
    fn test_empty_name_rejected() {
        let client = VectorClient::new(Arc::new(MemoryStore::new()));
        let err = client.get_or_create_collection("").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_repeated_handles_share_partition() {
        let client = VectorClient::new(Arc::new(MemoryStore::new()))
            .with_embedding_function(Arc::new(MockEmbedder::new(32)));

        let first = client.get_or_create_collection("sports").unwrap();
        first.add(AddRequest::documents(["kickoff times"])).unwrap();

        // A second handle over the same name sees the same records.
        let second = client.get_or_create_collection("sports").unwrap();
        assert_eq!(second.count(), 1);

        let results = second
            .query(QueryRequest::texts(["kickoff times"]).with_n_results(1))
            .unwrap();
        assert_eq!(results.documents[0], vec!["kickoff times"]);
    }

    #[test]
    fn test_collections_are_isolated() {
        let client = VectorClient::new(Arc::new(MemoryStore::new()))
            .with_embedding_function(Arc::new(MockEmbedder::new(32)));

        let a = client.get_or_create_collection("a").unwrap();
        let b = client.get_or_create_collection("b").unwrap();
        a.add(AddRequest::documents(["only in a"])).unwrap();

        assert_eq!(a.count(), 1);
        assert_eq!(b.count(), 0);
    }
}
