//! Embedding functions for text-to-vector conversion.
//!
//! The core never manufactures embeddings itself; it consumes an injected
//! [`EmbeddingFunction`] of fixed dimensionality. Two implementations ship
//! with the crate: [`HashEmbedder`] for lexical-overlap retrieval without an
//! ML runtime, and [`MockEmbedder`] for tests. Real model backends (ONNX,
//! OpenAI, ...) live in the consuming service and plug in through the trait.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::error::Result;
use crate::vector::distance::normalize;
use crate::vector::Embedding;

/// Trait for embedding functions.
///
/// Implementations must be deterministic for identical input within a
/// session; query results are only meaningful if every record in a
/// collection was embedded at the same dimensionality.
pub trait EmbeddingFunction: Send + Sync {
    /// Generate an embedding for a document.
    fn embed(&self, text: &str) -> Result<Embedding>;

    /// Generate an embedding for a query. Defaults to [`embed`](Self::embed);
    /// override for models with asymmetric query/passage encodings.
    fn embed_query(&self, text: &str) -> Result<Embedding> {
        self.embed(text)
    }

    /// Dimensionality of produced embeddings.
    fn dimensions(&self) -> usize;

    /// Model name, for diagnostics.
    fn model_name(&self) -> &str;
}

/// Hashed bag-of-words embedding, L2 normalized.
///
/// Each lowercased whitespace token is hashed to a dimension and counted.
/// Crude, but deterministic and dependency-free; overlapping vocabulary
/// produces genuinely higher cosine similarity.
pub struct HashEmbedder {
    dimensions: usize,
}

impl HashEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }
}

impl EmbeddingFunction for HashEmbedder {
    fn embed(&self, text: &str) -> Result<Embedding> {
        let mut vector = vec![0.0f32; self.dimensions];

        for word in text.split_whitespace() {
            let word = word.to_lowercase();
            let mut hasher = DefaultHasher::new();
            word.hash(&mut hasher);
            let idx = (hasher.finish() as usize) % self.dimensions;
            vector[idx] += 1.0;
        }

        normalize(&mut vector);
        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_name(&self) -> &str {
        "bow-hash"
    }
}

/// Mock embedder for tests: hash-seeded pseudo-random unit vectors,
/// deterministic per input text.
pub struct MockEmbedder {
    dimensions: usize,
}

impl MockEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }
}

impl EmbeddingFunction for MockEmbedder {
    fn embed(&self, text: &str) -> Result<Embedding> {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let seed = hasher.finish();

        // Simple LCG seeded by the text hash
        let mut state = seed;
        let mut vector: Embedding = (0..self.dimensions)
            .map(|_| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
                ((state >> 33) as f32) / (u32::MAX as f32) * 2.0 - 1.0
            })
            .collect();

        normalize(&mut vector);
        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
