//! OpenAI embeddings client

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use tweetrag_core::{DocumentMeta, EmbeddingProvider, Error, Result};

use crate::config::OpenAiConfig;

/// Embeddings client for OpenAI-compatible `/embeddings` endpoints.
///
/// Document texts are prefixed with their metadata values (id, then author),
/// one per line, so identity contributes to the vector. Queries are embedded as-is.
pub struct OpenAiEmbedder {
    client: Client,
    endpoint: String,
    model: String,
}

#[derive(Serialize)]
pub(crate) struct EmbeddingRequest<'a> {
    pub(crate) model: &'a str,
    pub(crate) input: &'a [String],
}

#[derive(Debug, Deserialize)]
pub(crate) struct EmbeddingResponse {
    pub(crate) data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EmbeddingData {
    pub(crate) embedding: Vec<f32>,
    pub(crate) index: usize,
}

impl OpenAiEmbedder {
    /// Create a new embedder from configuration
    pub fn new(config: &OpenAiConfig) -> Result<Self> {
        let client = build_client(config)?;
        Ok(Self {
            client,
            endpoint: config.endpoint("embeddings"),
            model: config.embedding_model.clone(),
        })
    }

    /// Text actually sent for a document: metadata values, then content, newline-joined
    pub fn prepare_text(content: &str, meta: &DocumentMeta) -> String {
        let mut parts: Vec<&str> = meta.values().to_vec();
        parts.push(content);
        parts.join("\n")
    }

    async fn request(&self, input: &[String]) -> Result<Vec<Vec<f32>>> {
        let body = EmbeddingRequest {
            model: &self.model,
            input,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::EmbeddingFailed(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(Error::EmbeddingFailed(format!(
                "embeddings request failed with status {}: {}",
                status, text
            )));
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| Error::EmbeddingFailed(format!("unreadable embeddings response: {}", e)))?;

        collect_embeddings(parsed, input.len())
    }
}

/// Order embeddings by their input index and check each input index appears exactly once.
pub(crate) fn collect_embeddings(mut response: EmbeddingResponse, expected: usize) -> Result<Vec<Vec<f32>>> {
    response.data.sort_by_key(|entry| entry.index);
    if response.data.len() != expected {
        return Err(Error::EmbeddingFailed(format!(
            "provider returned {} embeddings for {} inputs",
            response.data.len(),
            expected
        )));
    }
    if let Some((position, entry)) = response
        .data
        .iter()
        .enumerate()
        .find(|(position, entry)| entry.index != *position)
    {
        return Err(Error::EmbeddingFailed(format!(
            "embedding at position {} carries index {}",
            position, entry.index
        )));
    }
    Ok(response.data.into_iter().map(|entry| entry.embedding).collect())
}

pub(crate) fn build_client(config: &OpenAiConfig) -> Result<Client> {
    let mut headers = HeaderMap::new();
    let auth = format!("Bearer {}", config.api_key.trim());
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&auth)
            .map_err(|_| Error::Configuration("invalid OpenAI API key".to_string()))?,
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Client::builder()
        .timeout(config.timeout())
        .default_headers(headers)
        .build()
        .map_err(|e| Error::Configuration(format!("failed to build OpenAI HTTP client: {}", e)))
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbedder {
    async fn embed_batch(&self, texts: &[String], metadata: &[DocumentMeta]) -> Result<Vec<Vec<f32>>> {
        if texts.len() != metadata.len() {
            return Err(Error::EmbeddingFailed(format!(
                "{} texts but {} metadata entries",
                texts.len(),
                metadata.len()
            )));
        }
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let inputs: Vec<String> = texts
            .iter()
            .zip(metadata)
            .map(|(text, meta)| Self::prepare_text(text, meta))
            .collect();

        debug!("Embedding {} documents with {}", inputs.len(), self.model);
        self.request(&inputs).await
    }

    async fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        let mut embeddings = self.request(&[text.to_string()]).await?;
        embeddings
            .pop()
            .ok_or_else(|| Error::EmbeddingFailed("provider returned no embedding".to_string()))
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}
