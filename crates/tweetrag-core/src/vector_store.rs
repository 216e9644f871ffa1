//! Vector store trait and types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Record, Result};

/// Identifying metadata for a document. Opaque to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub id: String,
    pub author: String,
}

impl DocumentMeta {
    /// Metadata values in the order they are folded into embedded text.
    pub fn values(&self) -> [&str; 2] {
        [&self.id, &self.author]
    }
}

impl fmt::Display for DocumentMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{Id: {}, Author: {}}}", self.id, self.author)
    }
}

/// A record that has been embedded and can live in a vector store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub author: String,
    pub content: String,
    pub embedding: Vec<f32>,
}

impl Document {
    pub fn from_record(record: Record, embedding: Vec<f32>) -> Self {
        Self {
            id: record.id,
            author: record.author,
            content: record.content,
            embedding,
        }
    }

    pub fn meta(&self) -> DocumentMeta {
        DocumentMeta {
            id: self.id.clone(),
            author: self.author.clone(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.embedding.len()
    }
}

/// A document paired with its similarity to a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub document: Document,
    pub score: f32,
}

/// Similarity function a store ranks with. Fixed for the store's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMetric {
    #[default]
    Cosine,
    DotProduct,
}

impl SimilarityMetric {
    /// Score two equal-length vectors. Cosine against a zero vector is 0.
    pub fn score(&self, a: &[f32], b: &[f32]) -> f32 {
        let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
        match self {
            SimilarityMetric::DotProduct => dot,
            SimilarityMetric::Cosine => {
                let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
                let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
                if norm_a == 0.0 || norm_b == 0.0 {
                    return 0.0;
                }
                dot / (norm_a * norm_b)
            }
        }
    }
}

impl FromStr for SimilarityMetric {
    type Err = Error;

    /// Parses `cosine` or `dot_product` (also `dot-product`), case-insensitively.
    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "cosine" => Ok(SimilarityMetric::Cosine),
            "dot_product" | "dot-product" => Ok(SimilarityMetric::DotProduct),
            other => Err(Error::Configuration(format!(
                "unknown similarity metric '{}', expected 'cosine' or 'dot_product'",
                other
            ))),
        }
    }
}

/// Trait for vector stores
///
/// Stores are append-only and do not check `id` uniqueness. Every stored
/// embedding has the same dimension.
pub trait VectorStore: Send + Sync {
    /// Append documents. Fails with `InvalidDimension` if any embedding does not
    /// match the store's dimension; nothing is appended in that case.
    fn insert(&mut self, documents: Vec<Document>) -> Result<()>;

    /// Rank stored documents by descending similarity, ties in insertion order.
    ///
    /// Returns at most `top_k` results; `top_k == 0` returns nothing.
    fn search_scored(&self, query_embedding: &[f32], top_k: usize) -> Result<Vec<ScoredDocument>>;

    /// Like `search_scored`, without the scores.
    fn search(&self, query_embedding: &[f32], top_k: usize) -> Result<Vec<Document>> {
        Ok(self
            .search_scored(query_embedding, top_k)?
            .into_iter()
            .map(|scored| scored.document)
            .collect())
    }

    /// Get the total number of documents
    fn count(&self) -> usize;

    /// Embedding dimension, once the first document is stored
    fn dimension(&self) -> Option<usize>;

    fn metric(&self) -> SimilarityMetric;
}
