//! In-memory vector store

use tweetrag_core::{Document, Error, Result, ScoredDocument, SimilarityMetric, VectorStore};

/// Memory-resident store that ranks by brute-force similarity.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVectorStore {
    documents: Vec<Document>,
    dimension: Option<usize>,
    metric: SimilarityMetric,
}

impl InMemoryVectorStore {
    /// Create an empty cosine store
    pub fn new() -> Self {
        Self::with_metric(SimilarityMetric::Cosine)
    }

    pub fn with_metric(metric: SimilarityMetric) -> Self {
        Self {
            documents: Vec::new(),
            dimension: None,
            metric,
        }
    }

    /// Stored documents in insertion order
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }
}

/// NaN scores (from overflowing embeddings) rank below every real score.
fn rank_key(score: f32) -> f32 {
    if score.is_nan() { f32::NEG_INFINITY } else { score }
}

impl VectorStore for InMemoryVectorStore {
    fn insert(&mut self, documents: Vec<Document>) -> Result<()> {
        let mut expected = self.dimension;
        for doc in &documents {
            match expected {
                Some(dim) if dim != doc.dimension() => {
                    return Err(Error::InvalidDimension {
                        expected: dim,
                        actual: doc.dimension(),
                    });
                }
                Some(_) => {}
                None => expected = Some(doc.dimension()),
            }
        }

        self.dimension = expected;
        self.documents.extend(documents);
        Ok(())
    }

    fn search_scored(&self, query_embedding: &[f32], top_k: usize) -> Result<Vec<ScoredDocument>> {
        if let Some(dim) = self.dimension {
            if dim != query_embedding.len() {
                return Err(Error::InvalidDimension {
                    expected: dim,
                    actual: query_embedding.len(),
                });
            }
        }

        if top_k == 0 {
            return Ok(Vec::new());
        }

        let mut results: Vec<ScoredDocument> = self
            .documents
            .iter()
            .map(|doc| ScoredDocument {
                score: self.metric.score(query_embedding, &doc.embedding),
                document: doc.clone(),
            })
            .collect();

        // sort_by is stable, so equal scores keep insertion order
        results.sort_by(|a, b| rank_key(b.score).total_cmp(&rank_key(a.score)));
        results.truncate(top_k);

        Ok(results)
    }

    fn count(&self) -> usize {
        self.documents.len()
    }

    fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    fn metric(&self) -> SimilarityMetric {
        self.metric
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, embedding: Vec<f32>) -> Document {
        Document {
            id: id.to_string(),
            author: format!("author_{}", id),
            content: format!("content {}", id),
            embedding,
        }
    }

    /// Unit vector whose cosine to [1, 0] is `cos`
    fn at_cosine(id: &str, cos: f32) -> Document {
        doc(id, vec![cos, (1.0 - cos * cos).sqrt()])
    }

    fn ids(docs: &[Document]) -> Vec<&str> {
        docs.iter().map(|d| d.id.as_str()).collect()
    }

    #[test]
    fn test_ranking_by_similarity() {
        let mut store = InMemoryVectorStore::new();
        store
            .insert(vec![at_cosine("low", 0.1), at_cosine("high", 0.9), at_cosine("mid", 0.5)])
            .unwrap();

        let query = [1.0, 0.0];
        assert_eq!(ids(&store.search(&query, 3).unwrap()), vec!["high", "mid", "low"]);
        assert_eq!(ids(&store.search(&query, 1).unwrap()), vec!["high"]);
        assert!(store.search(&query, 0).unwrap().is_empty());

        let scored = store.search_scored(&query, 3).unwrap();
        assert!((scored[0].score - 0.9).abs() < 1e-5);
        assert!((scored[2].score - 0.1).abs() < 1e-5);
    }

    #[test]
    fn test_top_k_larger_than_store() {
        let mut store = InMemoryVectorStore::new();
        store.insert(vec![at_cosine("a", 0.3), at_cosine("b", 0.7)]).unwrap();

        let results = store.search(&[1.0, 0.0], 50).unwrap();
        assert_eq!(ids(&results), vec!["b", "a"]);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut store = InMemoryVectorStore::new();
        store
            .insert(vec![
                doc("first", vec![1.0, 1.0]),
                doc("other", vec![0.0, 1.0]),
                doc("second", vec![1.0, 1.0]),
            ])
            .unwrap();
        store.insert(vec![doc("third", vec![1.0, 1.0])]).unwrap();

        let results = store.search(&[1.0, 1.0], 4).unwrap();
        assert_eq!(ids(&results), vec!["first", "second", "third", "other"]);
    }

    #[test]
    fn test_duplicate_ids_are_kept() {
        let mut store = InMemoryVectorStore::new();
        store.insert(vec![doc("same", vec![1.0]), doc("same", vec![1.0])]).unwrap();
        assert_eq!(store.count(), 2);
    }

    #[test]
    fn test_query_dimension_mismatch() {
        let mut store = InMemoryVectorStore::new();
        store.insert(vec![doc("a", vec![1.0, 0.0, 0.0])]).unwrap();

        let err = store.search(&[1.0, 0.0], 1).unwrap_err();
        assert_eq!(err, Error::InvalidDimension { expected: 3, actual: 2 });
    }

    #[test]
    fn test_insert_dimension_mismatch_is_atomic() {
        let mut store = InMemoryVectorStore::new();
        store.insert(vec![doc("a", vec![1.0, 0.0])]).unwrap();

        let err = store
            .insert(vec![doc("b", vec![0.0, 1.0]), doc("c", vec![1.0])])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidDimension { expected: 2, actual: 1 }));
        assert_eq!(store.count(), 1);

        let mut fresh = InMemoryVectorStore::new();
        assert!(fresh.insert(vec![doc("x", vec![1.0]), doc("y", vec![1.0, 2.0])]).is_err());
        assert_eq!(fresh.count(), 0);
        assert_eq!(fresh.dimension(), None);
    }

    #[test]
    fn test_empty_store_search() {
        let store = InMemoryVectorStore::new();
        assert_eq!(store.count(), 0);
        assert!(store.search(&[0.3, 0.1, 0.9], 5).unwrap().is_empty());
    }

    #[test]
    fn test_zero_query_vector() {
        let mut store = InMemoryVectorStore::new();
        store.insert(vec![doc("a", vec![1.0, 0.0]), doc("b", vec![0.0, 1.0])]).unwrap();

        let scored = store.search_scored(&[0.0, 0.0], 2).unwrap();
        assert!(scored.iter().all(|s| s.score == 0.0));
        assert_eq!(scored[0].document.id, "a");
    }

    #[test]
    fn test_nan_scores_rank_last() {
        let mut store = InMemoryVectorStore::new();
        store
            .insert(vec![
                doc("overflow", vec![f32::INFINITY, 0.0]),
                at_cosine("mid", 0.5),
                at_cosine("high", 0.9),
            ])
            .unwrap();

        let scored = store.search_scored(&[1.0, 0.0], 3).unwrap();
        assert!(scored[2].score.is_nan());
        let ranked: Vec<&str> = scored.iter().map(|s| s.document.id.as_str()).collect();
        assert_eq!(ranked, vec!["high", "mid", "overflow"]);

        assert_eq!(ids(&store.search(&[1.0, 0.0], 1).unwrap()), vec!["high"]);
    }

    #[test]
    fn test_dot_product_metric() {
        let mut store = InMemoryVectorStore::with_metric(SimilarityMetric::DotProduct);
        store.insert(vec![doc("short", vec![1.0, 0.0]), doc("long", vec![3.0, 0.0])]).unwrap();

        assert_eq!(store.metric(), SimilarityMetric::DotProduct);
        assert_eq!(ids(&store.search(&[1.0, 0.0], 2).unwrap()), vec!["long", "short"]);
    }
}
