//! OpenAI chat completions client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;

use tweetrag_core::{Error, GenerationConfig, GenerationProvider, GenerationResult, Result};

use crate::config::OpenAiConfig;
use crate::embedder::build_client;

/// Generation client for OpenAI-compatible `/chat/completions` endpoints.
///
/// The composed prompt is sent as a single user message.
pub struct OpenAiGenerator {
    client: Client,
    endpoint: String,
    model: String,
    timeout: std::time::Duration,
}

#[derive(Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub(crate) model: &'a str,
    pub(crate) messages: Vec<ChatMessage<'a>>,
    pub(crate) max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) temperature: Option<f32>,
}

#[derive(Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub(crate) role: &'a str,
    pub(crate) content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    pub(crate) choices: Vec<ChatChoice>,
    #[serde(default)]
    pub(crate) usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoice {
    pub(crate) message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssistantMessage {
    #[serde(default)]
    pub(crate) content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Usage {
    pub(crate) total_tokens: u32,
}

impl OpenAiGenerator {
    /// Create a new generator from configuration
    pub fn new(config: &OpenAiConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            endpoint: config.endpoint("chat/completions"),
            model: config.generation_model.clone(),
            timeout: config.timeout(),
        })
    }

    pub(crate) fn build_request<'a>(prompt: &'a str, config: &'a GenerationConfig) -> ChatRequest<'a> {
        ChatRequest {
            model: &config.model_id,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }

    async fn perform_generation(&self, prompt: &str, config: &GenerationConfig) -> Result<ChatResponse> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&Self::build_request(prompt, config))
            .send()
            .await
            .map_err(|e| Error::GenerationFailed(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(Error::GenerationFailed(format!(
                "chat completion failed with status {}: {}",
                status, text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::GenerationFailed(format!("unreadable chat completion: {}", e)))
    }
}

/// Completion texts in choice order; choices without content are skipped.
pub(crate) fn collect_replies(response: ChatResponse) -> Vec<String> {
    response
        .choices
        .into_iter()
        .filter_map(|choice| choice.message.content)
        .collect()
}

#[async_trait]
impl GenerationProvider for OpenAiGenerator {
    async fn generate_with_config(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<GenerationResult> {
        let response = match timeout(config.timeout, self.perform_generation(prompt, config)).await {
            Ok(result) => result?,
            Err(_) => return Err(Error::GenerationFailed("request timed out".to_string())),
        };

        let tokens_used = response.usage.as_ref().map(|usage| usage.total_tokens);
        Ok(GenerationResult {
            replies: collect_replies(response),
            model_id: config.model_id.clone(),
            tokens_used,
        })
    }

    async fn generate(&self, prompt: &str) -> Result<GenerationResult> {
        let config = GenerationConfig {
            model_id: self.model.clone(),
            timeout: self.timeout,
            ..Default::default()
        };
        self.generate_with_config(prompt, &config).await
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}
