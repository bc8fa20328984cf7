//! Retrieval-augmented answer flow.
//!
//! Retrieves the top-k most similar stored records for a question,
//! concatenates their text as context, and forwards context plus question
//! to an injected language model. The model client itself (Claude, OpenAI,
//! a local runtime) lives in the consuming service.

use std::sync::Arc;
use tracing::debug;

use crate::error::Result;
use crate::vector::{QueryRequest, VectorCollection};

/// Reply produced when retrieval finds nothing; the language model is not
/// called with empty context.
pub const NO_CONTEXT_REPLY: &str =
    "I couldn't find any relevant context to answer that question.";

/// A chat-style language model completion call.
pub trait LanguageModel: Send + Sync {
    /// Produce a completion for `prompt` under `system_prompt`.
    fn complete(&self, system_prompt: &str, prompt: &str) -> Result<String>;
}

/// Answers questions over one collection: retrieve, assemble context, ask
/// the model.
pub struct RagPipeline {
    collection: VectorCollection,
    model: Arc<dyn LanguageModel>,
    system_prompt: String,
    top_k: usize,
}

impl RagPipeline {
    /// Default number of retrieved documents used as context.
    pub const DEFAULT_TOP_K: usize = 3;

    pub fn new(collection: VectorCollection, model: Arc<dyn LanguageModel>) -> Self {
        Self {
            collection,
            model,
            system_prompt: String::new(),
            top_k: Self::DEFAULT_TOP_K,
        }
    }

    /// Set the system prompt passed to the model.
    pub fn with_system_prompt(mut self, system_prompt: &str) -> Self {
        self.system_prompt = system_prompt.to_string();
        self
    }

    /// Set how many retrieved documents are concatenated as context.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Answer a question using retrieved context.
    ///
    /// Empty retrieval short-circuits to [`NO_CONTEXT_REPLY`] without
    /// calling the model.
    pub fn answer(&self, question: &str) -> Result<String> {
        let results = self
            .collection
            .query(QueryRequest::texts([question]).with_n_results(self.top_k))?;

        let documents = &results.documents[0];
        if documents.is_empty() {
            debug!(collection = self.collection.name(), "no context retrieved");
            return Ok(NO_CONTEXT_REPLY.to_string());
        }

        let context = documents.join("\n\n");
        debug!(
            collection = self.collection.name(),
            retrieved = documents.len(),
            "answering with retrieved context"
        );

        let prompt = format!("Context:\n{context}\n\nQuestion: {question}");
        self.model.complete(&self.system_prompt, &prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::MockEmbedder;
    use crate::store::MemoryStore;
    use crate::vector::{AddRequest, VectorClient};
    use std::sync::Mutex;

    /// Records the prompts it receives and echoes a canned reply.
    struct RecordingModel {
        calls: Mutex<Vec<(String, String)>>,
    }

    impl RecordingModel {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl LanguageModel for RecordingModel {
        fn complete(&self, system_prompt: &str, prompt: &str) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((system_prompt.to_string(), prompt.to_string()));
            Ok("canned answer".to_string())
        }
    }

    fn collection_with(docs: &[&str]) -> VectorCollection {
        let client = VectorClient::new(Arc::new(MemoryStore::new()))
            .with_embedding_function(Arc::new(MockEmbedder::new(32)));
        let coll = client.get_or_create_collection("kb").unwrap();
        if !docs.is_empty() {
            coll.add(AddRequest::documents(docs.iter().copied())).unwrap();
        }
        coll
    }

    #[test]
    fn test_answer_passes_retrieved_context() {
        let model = Arc::new(RecordingModel::new());
        let pipeline = RagPipeline::new(
            collection_with(&["doc one", "doc two", "doc three", "doc four"]),
            model.clone(),
        )
        .with_system_prompt("you are a sports assistant")
        .with_top_k(2);

        let answer = pipeline.answer("doc one").unwrap();
        assert_eq!(answer, "canned answer");

        let calls = model.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (system, prompt) = &calls[0];
        assert_eq!(system, "you are a sports assistant");
        assert!(prompt.starts_with("Context:\n"));
        assert!(prompt.contains("doc one"));
        assert!(prompt.ends_with("Question: doc one"));
        // top_k = 2: exactly two documents joined by a blank line
        let context = prompt
            .trim_start_matches("Context:\n")
            .split("\n\nQuestion:")
            .next()
            .unwrap();
        assert_eq!(context.split("\n\n").count(), 2);
    }

    #[test]
    fn test_empty_retrieval_skips_model() {
        let model = Arc::new(RecordingModel::new());
        let pipeline = RagPipeline::new(collection_with(&[]), model.clone());

        let answer = pipeline.answer("anything").unwrap();
        assert_eq!(answer, NO_CONTEXT_REPLY);
        assert!(model.calls.lock().unwrap().is_empty());
    }
}
