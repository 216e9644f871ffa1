//! OpenAI providers for tweetrag
//!
//! This crate provides OpenAI-backed implementations of the EmbeddingProvider and
//! GenerationProvider traits.

mod config;
mod embedder;
mod generator;


pub use config::OpenAiConfig;
pub use embedder::OpenAiEmbedder;
pub use generator::OpenAiGenerator;

// Re-export core types for convenience
pub use tweetrag_core::{
    DocumentMeta, EmbeddingProvider, Error, GenerationConfig, GenerationProvider,
    GenerationResult, Result,
};
