//! Retrieval-augmented question answering over tweets
//!
//! This crate provides the in-memory vector store, the indexing pipeline, the
//! prompt composer and the query pipeline that ties them to the providers.

mod indexer;
mod pipeline;
mod prompt;
mod vector_store;


pub use indexer::DocumentIndexer;
pub use pipeline::RagPipeline;
pub use prompt::PromptComposer;
pub use vector_store::InMemoryVectorStore;

// Re-export core types for convenience
pub use tweetrag_core::{
    Document, DocumentMeta, EmbeddingProvider, Error, GenerationConfig, GenerationProvider,
    GenerationResult, IndexingReport, Record, Result, RetrievalBreadth, ScoredDocument,
    SimilarityMetric, VectorStore,
};
