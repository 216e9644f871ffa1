//! Query pipeline with an atomically published vector store

use std::sync::{Arc, RwLock};

use tracing::{debug, info};

use tweetrag_core::{
    EmbeddingProvider, Error, GenerationProvider, IndexingReport, Record, Result,
    RetrievalBreadth, ScoredDocument, SimilarityMetric, VectorStore,
};

use crate::{DocumentIndexer, InMemoryVectorStore, PromptComposer};

/// Indexes records and answers questions grounded in them.
///
/// The current store sits behind an `Arc` that is replaced wholesale on every
/// indexing run. Queries work on the snapshot they started with, so they never
/// observe a partially built store.
pub struct RagPipeline<E: EmbeddingProvider, G: GenerationProvider> {
    embedder: E,
    generator: G,
    composer: PromptComposer,
    breadth: RetrievalBreadth,
    metric: SimilarityMetric,
    store: RwLock<Arc<InMemoryVectorStore>>,
}

impl<E: EmbeddingProvider, G: GenerationProvider> RagPipeline<E, G> {
    /// Create a pipeline with an empty cosine store and full-corpus retrieval
    pub fn new(embedder: E, generator: G) -> Self {
        Self {
            embedder,
            generator,
            composer: PromptComposer::new(),
            breadth: RetrievalBreadth::FullCorpus,
            metric: SimilarityMetric::Cosine,
            store: RwLock::new(Arc::new(InMemoryVectorStore::new())),
        }
    }

    pub fn with_breadth(mut self, breadth: RetrievalBreadth) -> Self {
        self.breadth = breadth;
        self
    }

    pub fn breadth(&self) -> RetrievalBreadth {
        self.breadth
    }

    /// Rank with `metric` instead of cosine. Stores built by later `index` runs use it.
    pub fn with_metric(mut self, metric: SimilarityMetric) -> Self {
        self.metric = metric;
        self.store = RwLock::new(Arc::new(InMemoryVectorStore::with_metric(metric)));
        self
    }

    pub fn metric(&self) -> SimilarityMetric {
        self.metric
    }

    /// Replace the indexed corpus with `records`.
    ///
    /// The new store is built completely before it is published. On failure the
    /// previously published store stays in place.
    pub async fn index(&self, records: Vec<Record>) -> Result<IndexingReport> {
        let (store, report) = DocumentIndexer::new(&self.embedder)
            .with_metric(self.metric)
            .build_store(records)
            .await?;
        self.publish(store);
        Ok(report)
    }

    /// Number of documents in the published store
    pub fn count(&self) -> usize {
        self.snapshot().count()
    }

    /// Embed the question and rank the published store against it.
    pub async fn retrieve(&self, question: &str) -> Result<Vec<ScoredDocument>> {
        let store = self.snapshot();
        self.retrieve_from(&store, question).await
    }

    /// Answer a question with the first completion from the generation provider.
    ///
    /// An empty store is not an error: the prompt is composed with no documents
    /// and generation still runs.
    pub async fn answer(&self, question: &str) -> Result<String> {
        let store = self.snapshot();
        info!("Number of documents in store: {}", store.count());

        let ranked = self.retrieve_from(&store, question).await?;
        let documents: Vec<_> = ranked.into_iter().map(|scored| scored.document).collect();

        let prompt = self.composer.compose(question, &documents);
        debug!("Composed prompt with {} documents ({} bytes)", documents.len(), prompt.len());

        let result = self.generator.generate(&prompt).await?;
        result
            .replies
            .into_iter()
            .next()
            .ok_or_else(|| Error::GenerationFailed("provider returned no completions".to_string()))
    }

    async fn retrieve_from(&self, store: &InMemoryVectorStore, question: &str) -> Result<Vec<ScoredDocument>> {
        let query_embedding = self.embedder.embed_one(question).await?;
        let top_k = self.breadth.resolve(store.count());
        store.search_scored(&query_embedding, top_k)
    }

    fn snapshot(&self) -> Arc<InMemoryVectorStore> {
        // Poisoning cannot leave a half-written store behind.
        let guard = self.store.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&guard)
    }

    fn publish(&self, store: InMemoryVectorStore) {
        let mut guard = self.store.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Arc::new(store);
    }
}
