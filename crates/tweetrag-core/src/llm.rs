//! Generation provider trait and types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::Result;

/// Configuration for text generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub model_id: String,
    pub max_tokens: u32,
    pub temperature: Option<f32>,
    pub timeout: Duration,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model_id: "gpt-4o-mini".to_string(),
            max_tokens: 512,
            temperature: None,
            timeout: Duration::from_secs(60),
        }
    }
}

/// Result of a text generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Completions in provider order. The pipeline answers with the first one.
    pub replies: Vec<String>,
    pub model_id: String,
    pub tokens_used: Option<u32>,
}

/// Trait for generation providers (e.g., OpenAI chat completions)
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generate completions with custom configuration
    async fn generate_with_config(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<GenerationResult>;

    /// Get the model ID being used
    fn model_id(&self) -> &str;

    /// Generate completions using the provider's model and default settings
    async fn generate(&self, prompt: &str) -> Result<GenerationResult> {
        let config = GenerationConfig {
            model_id: self.model_id().to_string(),
            ..Default::default()
        };
        self.generate_with_config(prompt, &config).await
    }
}

#[async_trait]
impl<T: GenerationProvider + ?Sized> GenerationProvider for Arc<T> {
    async fn generate_with_config(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<GenerationResult> {
        (**self).generate_with_config(prompt, config).await
    }

    fn model_id(&self) -> &str {
        (**self).model_id()
    }

    async fn generate(&self, prompt: &str) -> Result<GenerationResult> {
        (**self).generate(prompt).await
    }
}
