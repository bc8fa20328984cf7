//! Embedding-indexed document store.
//!
//! Stores text alongside vector embeddings and metadata, and answers exact
//! top-k similarity queries by brute-force cosine scan, O(N·d) per query
//! over the filtered candidate set, with no index built or maintained.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use sidelinedb::{VectorClient, MemoryStore, HashEmbedder};
//! use sidelinedb::vector::{AddRequest, QueryRequest};
//!
//! let client = VectorClient::new(Arc::new(MemoryStore::new()))
//!     .with_embedding_function(Arc::new(HashEmbedder::new(384)));
//!
//! let collection = client.get_or_create_collection("nfl_news")?;
//! collection.add(AddRequest::documents(["Jets sign a new quarterback"]))?;
//!
//! let results = collection.query(QueryRequest::texts(["quarterback news"]).with_n_results(3))?;
//! ```

pub mod client;
pub mod collection;
pub mod distance;
pub mod types;

pub use client::VectorClient;
pub use collection::VectorCollection;
pub use types::{AddRequest, Embedding, QueryRequest, QueryResponse, Where, WhereDocument};
