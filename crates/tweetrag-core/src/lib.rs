//! Core traits and types for tweetrag
//!
//! This crate defines the data model and the capability-facing interfaces shared by
//! the rest of the workspace: embedding providers, generation providers and vector
//! stores. Keeping them here lets the pipeline be exercised with deterministic fakes.

pub mod embedding;
pub mod error;
pub mod llm;
pub mod record;
pub mod types;
pub mod vector_store;


pub use embedding::EmbeddingProvider;
pub use error::{Error, Result};
pub use llm::{GenerationConfig, GenerationProvider, GenerationResult};
pub use record::{parse_records, Record};
pub use types::{IndexingReport, RetrievalBreadth};
pub use vector_store::{
    Document, DocumentMeta, ScoredDocument, SimilarityMetric, VectorStore,
};
