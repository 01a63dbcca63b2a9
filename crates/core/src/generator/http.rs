//! # HTTP Generator
//!
//! `TextGenerator` implementation over HTTPS. Anthropic speaks its Messages
//! API; every other provider is served through the OpenAI-compatible
//! chat-completions shape, so one request/response pair covers them all.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::models::{LlmProvider, ModelConfig};

use super::{GenerationRequest, GenerationResponse, GeneratorError, TextGenerator, TokenUsage};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// HTTP transport for the generator contract.
pub struct HttpGenerator {
    config: ModelConfig,
    client: reqwest::Client,
}

impl HttpGenerator {
    pub fn new(config: ModelConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { config, client }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    fn api_key(&self) -> Result<String, GeneratorError> {
        let env = self.config.provider.api_key_env();
        std::env::var(env).map_err(|_| GeneratorError::MissingApiKey(env))
    }

    async fn call_anthropic(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GeneratorError> {
        let body = json!({
            "model": self.config.model,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
            "system": request.system_prompt,
            "messages": [{ "role": "user", "content": request.user_message }],
        });

        let response = self
            .client
            .post(self.config.endpoint())
            .header("x-api-key", self.api_key()?)
            .header("anthropic-version", "2023-06-01")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GeneratorError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: AnthropicResponse = response.json().await?;
        let text = parsed
            .content
            .into_iter()
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");
        if text.is_empty() {
            return Err(GeneratorError::EmptyResponse);
        }

        Ok(GenerationResponse {
            text,
            usage: TokenUsage {
                input_tokens: parsed.usage.input_tokens,
                output_tokens: parsed.usage.output_tokens,
            },
        })
    }

    async fn call_openai_compatible(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GeneratorError> {
        let body = json!({
            "model": self.config.model,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
            "messages": [
                { "role": "system", "content": request.system_prompt },
                { "role": "user", "content": request.user_message },
            ],
        });

        let response = self
            .client
            .post(self.config.endpoint())
            .bearer_auth(self.api_key()?)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GeneratorError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();
        if text.is_empty() {
            return Err(GeneratorError::EmptyResponse);
        }

        Ok(GenerationResponse {
            text,
            usage: TokenUsage {
                input_tokens: parsed.usage.prompt_tokens,
                output_tokens: parsed.usage.completion_tokens,
            },
        })
    }
}

#[async_trait]
impl TextGenerator for HttpGenerator {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GeneratorError> {
        match self.config.provider {
            LlmProvider::Anthropic => self.call_anthropic(request).await,
            _ => self.call_openai_compatible(request).await,
        }
    }
}

// Wire shapes. Only the fields the pipeline reads.

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<AnthropicContentBlock>,
    #[serde(default)]
    usage: AnthropicUsage,
}

#[derive(Debug, Deserialize)]
struct AnthropicContentBlock {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AnthropicUsage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: ChatUsage,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anthropic_response_shape() {
        let raw = r#"{
            "content": [{"type": "text", "text": "hello"}],
            "usage": {"input_tokens": 12, "output_tokens": 3}
        }"#;
        let parsed: AnthropicResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.content[0].text.as_deref(), Some("hello"));
        assert_eq!(parsed.usage.input_tokens, 12);
    }

    #[test]
    fn test_chat_response_shape() {
        let raw = r#"{
            "choices": [{"message": {"role": "assistant", "content": "hi"}}],
            "usage": {"prompt_tokens": 20, "completion_tokens": 5}
        }"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("hi")
        );
        assert_eq!(parsed.usage.completion_tokens, 5);
    }

    #[test]
    fn test_missing_api_key_error() {
        std::env::remove_var("XAI_API_KEY");
        let generator =
            HttpGenerator::new(ModelConfig::with_provider(LlmProvider::Grok, "grok-2"));
        assert!(matches!(
            generator.api_key(),
            Err(GeneratorError::MissingApiKey("XAI_API_KEY"))
        ));
    }
}
