//! Indexing pipeline: records in, populated vector store out

use tracing::info;

use tweetrag_core::{
    Document, DocumentMeta, EmbeddingProvider, Error, IndexingReport, Record, Result,
    SimilarityMetric, VectorStore,
};

use crate::InMemoryVectorStore;

/// Builds a fresh vector store from a full set of records.
///
/// The indexer never touches an existing store. Callers publish the returned
/// store once it is complete, which gives full re-index semantics.
pub struct DocumentIndexer<'a, E: EmbeddingProvider + ?Sized> {
    embedder: &'a E,
    metric: SimilarityMetric,
}

impl<'a, E: EmbeddingProvider + ?Sized> DocumentIndexer<'a, E> {
    pub fn new(embedder: &'a E) -> Self {
        Self {
            embedder,
            metric: SimilarityMetric::Cosine,
        }
    }

    pub fn with_metric(mut self, metric: SimilarityMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Embed every record in one batch call and load the results into a new store.
    ///
    /// Any embedding failure aborts the run without producing a store.
    pub async fn build_store(&self, records: Vec<Record>) -> Result<(InMemoryVectorStore, IndexingReport)> {
        let sizes: Vec<usize> = records.iter().map(|r| r.content.len()).collect();
        for (i, size) in sizes.iter().enumerate() {
            info!("Document {}: size = {} bytes", i + 1, size);
        }

        let report = IndexingReport::from_sizes(&sizes);
        info!("Total number of documents: {}", report.documents_indexed);
        info!("Total size of all documents: {} bytes", report.total_bytes);
        if let Some(average) = report.average_bytes {
            info!("Average document size: {:.2} bytes", average);
        }

        let texts: Vec<String> = records.iter().map(|r| r.content.clone()).collect();
        let metadata: Vec<DocumentMeta> = records.iter().map(Record::meta).collect();

        let embeddings = if records.is_empty() {
            Vec::new()
        } else {
            self.embedder.embed_batch(&texts, &metadata).await?
        };

        if embeddings.len() != records.len() {
            return Err(Error::EmbeddingFailed(format!(
                "provider returned {} embeddings for {} documents",
                embeddings.len(),
                records.len()
            )));
        }

        let documents: Vec<Document> = records
            .into_iter()
            .zip(embeddings)
            .map(|(record, embedding)| Document::from_record(record, embedding))
            .collect();

        let mut store = InMemoryVectorStore::with_metric(self.metric);
        store.insert(documents).map_err(|e| match e {
            Error::InvalidDimension { expected, actual } => Error::EmbeddingFailed(format!(
                "provider returned mixed embedding dimensions ({} and {})",
                expected, actual
            )),
            other => other,
        })?;

        info!("Documents in store: {}", store.count());
        Ok((store, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Embeds each text as [len, position].
    struct PositionEmbedder;

    #[async_trait]
    impl EmbeddingProvider for PositionEmbedder {
        async fn embed_batch(&self, texts: &[String], metadata: &[DocumentMeta]) -> Result<Vec<Vec<f32>>> {
            assert_eq!(texts.len(), metadata.len());
            Ok(texts
                .iter()
                .enumerate()
                .map(|(i, text)| vec![text.len() as f32, i as f32])
                .collect())
        }

        async fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
            Ok(vec![text.len() as f32, 0.0])
        }

        fn model_id(&self) -> &str {
            "position"
        }
    }

    struct ShortBatchEmbedder;

    #[async_trait]
    impl EmbeddingProvider for ShortBatchEmbedder {
        async fn embed_batch(&self, _texts: &[String], _metadata: &[DocumentMeta]) -> Result<Vec<Vec<f32>>> {
            Ok(vec![vec![1.0]])
        }

        async fn embed_one(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![1.0])
        }

        fn model_id(&self) -> &str {
            "short"
        }
    }

    struct RaggedEmbedder;

    #[async_trait]
    impl EmbeddingProvider for RaggedEmbedder {
        async fn embed_batch(&self, texts: &[String], _metadata: &[DocumentMeta]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().enumerate().map(|(i, _)| vec![1.0; i + 1]).collect())
        }

        async fn embed_one(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![1.0])
        }

        fn model_id(&self) -> &str {
            "ragged"
        }
    }

    #[tokio::test]
    async fn test_embeddings_follow_record_order() {
        let records = vec![
            Record::new("1", "a", "x"),
            Record::new("2", "b", "yy"),
            Record::new("3", "c", "zzz"),
        ];

        let (store, report) = DocumentIndexer::new(&PositionEmbedder)
            .build_store(records)
            .await
            .unwrap();

        assert_eq!(store.count(), 3);
        assert_eq!(report.documents_indexed, 3);
        assert_eq!(report.total_bytes, 6);

        let docs = store.documents();
        assert_eq!((docs[0].id.as_str(), docs[0].author.as_str()), ("1", "a"));
        assert_eq!(docs[0].embedding, vec![1.0, 0.0]);
        assert_eq!((docs[2].id.as_str(), docs[2].author.as_str()), ("3", "c"));
        assert_eq!(docs[2].embedding, vec![3.0, 2.0]);
    }

    #[tokio::test]
    async fn test_empty_records() {
        let (store, report) = DocumentIndexer::new(&ShortBatchEmbedder)
            .build_store(Vec::new())
            .await
            .unwrap();

        assert_eq!(store.count(), 0);
        assert!(report.average_bytes.is_none());
    }

    #[tokio::test]
    async fn test_length_mismatch_fails() {
        let records = vec![Record::new("1", "a", "x"), Record::new("2", "b", "y")];
        let err = DocumentIndexer::new(&ShortBatchEmbedder)
            .build_store(records)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::EmbeddingFailed(_)));
    }

    #[tokio::test]
    async fn test_mixed_dimensions_fail() {
        let records = vec![Record::new("1", "a", "x"), Record::new("2", "b", "y")];
        let err = DocumentIndexer::new(&RaggedEmbedder)
            .build_store(records)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::EmbeddingFailed(_)));
    }

    #[tokio::test]
    async fn test_metric_is_carried_to_store() {
        let (store, _) = DocumentIndexer::new(&PositionEmbedder)
            .with_metric(SimilarityMetric::DotProduct)
            .build_store(vec![Record::new("1", "a", "x")])
            .await
            .unwrap();

        assert_eq!(store.metric(), SimilarityMetric::DotProduct);
    }
}
