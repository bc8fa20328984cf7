//! SidelineDB - a lightweight embedding-indexed document store for
//! retrieval-augmented generation.
//!
//! Text documents are stored alongside their vector embeddings and open
//! metadata, then retrieved by exact top-k cosine similarity. The store and
//! the embedding model are injected collaborators, so the same core runs
//! against an in-memory table in tests and a real document database plus ML
//! embedder in production.
//!
//! # Architecture
//!
//! ```text
//! Documents -> EmbeddingFunction -> RecordStore
//!                                       |
//! Question -> EmbeddingFunction -> VectorCollection::query
//!                                       |
//!                          ranked documents -> RagPipeline -> LanguageModel
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use sidelinedb::{HashEmbedder, MemoryStore, VectorClient};
//! use sidelinedb::vector::{AddRequest, QueryRequest};
//!
//! let client = VectorClient::new(Arc::new(MemoryStore::new()))
//!     .with_embedding_function(Arc::new(HashEmbedder::new(384)));
//!
//! let collection = client.get_or_create_collection("nfl_news")?;
//! collection.add(AddRequest::documents([
//!     "Jets sign a new quarterback",
//!     "Lakers win in overtime",
//! ]))?;
//!
//! let results = collection.query(QueryRequest::texts(["quarterback news"]).with_n_results(3))?;
//! println!("{:?}", results.documents[0]);
//! ```

pub mod embed;
pub mod error;
pub mod rag;
pub mod store;
pub mod types;
pub mod vector;

pub use embed::{EmbeddingFunction, HashEmbedder, MockEmbedder};
pub use error::{Error, Result};
pub use rag::{LanguageModel, RagPipeline};
pub use store::{MemoryStore, RecordStore};
pub use types::{EmbeddedRecord, Metadata, MetadataValue};
pub use vector::{
    AddRequest, Embedding, QueryRequest, QueryResponse, VectorClient, VectorCollection, Where,
    WhereDocument,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn client() -> VectorClient {
        VectorClient::new(Arc::new(MemoryStore::new()))
            .with_embedding_function(Arc::new(HashEmbedder::new(256)))
    }

    #[test]
    fn test_end_to_end_lexical_retrieval() {
        let client = client();
        let coll = client.get_or_create_collection("animals").unwrap();

        coll.add(
            AddRequest::documents([
                "cats are mammals",
                "dogs are mammals",
                "tuna is a fish",
            ])
            .with_ids(["cats", "dogs", "tuna"]),
        )
        .unwrap();

        // Word overlap with both mammal documents beats the fish document.
        let results = coll
            .query(QueryRequest::texts(["are dogs mammals"]).with_n_results(2))
            .unwrap();

        assert_eq!(results.ids[0].len(), 2);
        assert_eq!(results.ids[0][0], "dogs");
        assert!(!results.ids[0].contains(&"tuna".to_string()));
    }

    #[test]
    fn test_end_to_end_filtered_query() {
        let client = client();
        let coll = client.get_or_create_collection("news").unwrap();

        let mut ids = Vec::new();
        for source in ["a", "b"] {
            for i in 0..5 {
                let mut metadata = Metadata::new();
                metadata.insert("source".to_string(), source.into());
                let inserted = coll
                    .add(
                        AddRequest::documents([format!("{source} headline {i}")])
                            .with_metadatas([metadata]),
                    )
                    .unwrap();
                ids.extend(inserted);
            }
        }
        assert_eq!(coll.count(), 10);

        let results = coll
            .query(
                QueryRequest::texts(["headline"])
                    .with_n_results(10)
                    .with_where(Where::new().eq("source", "a")),
            )
            .unwrap();

        assert_eq!(results.ids[0].len(), 5);
        assert!(results.metadatas[0]
            .iter()
            .all(|m| m["source"] == "a".into()));
    }

    #[test]
    fn test_end_to_end_rag_flow() {
        struct ContextEcho;
        impl LanguageModel for ContextEcho {
            fn complete(&self, _system_prompt: &str, prompt: &str) -> Result<String> {
                Ok(prompt.to_string())
            }
        }

        let client = client();
        let coll = client.get_or_create_collection("kb").unwrap();
        coll.add(AddRequest::documents([
            "The Chiefs won the Super Bowl in overtime",
            "Trade deadline passes quietly",
        ]))
        .unwrap();

        let pipeline = RagPipeline::new(
            client.get_or_create_collection("kb").unwrap(),
            Arc::new(ContextEcho),
        );
        let answer = pipeline.answer("who won the Super Bowl").unwrap();
        assert!(answer.contains("The Chiefs won the Super Bowl in overtime"));
        assert!(answer.ends_with("Question: who won the Super Bowl"));
    }
}
