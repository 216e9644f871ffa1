//! Embedding provider trait

use async_trait::async_trait;
use std::sync::Arc;

use crate::{DocumentMeta, Result};

/// Trait for embedding providers (e.g., OpenAI, local models)
///
/// The same provider embeds documents at indexing time and questions at query
/// time, so both land in one vector space.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a batch of document texts.
    ///
    /// `metadata` runs parallel to `texts`; providers may fold it into the
    /// embedded text. The output must have one vector per input, in input order.
    async fn embed_batch(&self, texts: &[String], metadata: &[DocumentMeta]) -> Result<Vec<Vec<f32>>>;

    /// Embed a single query text
    async fn embed_one(&self, text: &str) -> Result<Vec<f32>>;

    /// Get the model ID being used
    fn model_id(&self) -> &str;
}

#[async_trait]
impl<T: EmbeddingProvider + ?Sized> EmbeddingProvider for Arc<T> {
    async fn embed_batch(&self, texts: &[String], metadata: &[DocumentMeta]) -> Result<Vec<Vec<f32>>> {
        (**self).embed_batch(texts, metadata).await
    }

    async fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        (**self).embed_one(text).await
    }

    fn model_id(&self) -> &str {
        (**self).model_id()
    }
}
