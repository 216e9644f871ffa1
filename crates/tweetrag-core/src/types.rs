//! Common types used across the tweetrag pipeline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How many ranked documents the query pipeline feeds into the prompt.
///
/// `FullCorpus` ranks and includes every stored document; nothing is dropped
/// for low similarity. `TopK` bounds the number of grounding documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalBreadth {
    #[default]
    FullCorpus,
    TopK(usize),
}

impl RetrievalBreadth {
    /// Number of documents to request from a store holding `stored` documents.
    pub fn resolve(&self, stored: usize) -> usize {
        match self {
            RetrievalBreadth::FullCorpus => stored,
            RetrievalBreadth::TopK(k) => (*k).min(stored),
        }
    }
}

/// Diagnostics from one indexing run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexingReport {
    pub documents_indexed: usize,
    pub total_bytes: usize,
    /// `None` when no documents were indexed
    pub average_bytes: Option<f64>,
    pub indexed_at: DateTime<Utc>,
}

impl IndexingReport {
    pub fn from_sizes(sizes: &[usize]) -> Self {
        let total_bytes: usize = sizes.iter().sum();
        let average_bytes = if sizes.is_empty() {
            None
        } else {
            Some(total_bytes as f64 / sizes.len() as f64)
        };

        Self {
            documents_indexed: sizes.len(),
            total_bytes,
            average_bytes,
            indexed_at: Utc::now(),
        }
    }
}
