//! # PageForge Models
//!
//! Centralized LLM configuration types for the PageForge pipeline.
//! These types provide a clean dependency for both the skills and the
//! orchestrator without tying either to a concrete HTTP transport.

use serde::{Deserialize, Serialize};

/// Supported LLM providers
///
/// Each provider loads its API key from an environment variable:
/// - Anthropic (Claude) - `ANTHROPIC_API_KEY`
/// - OpenAI (GPT) - `OPENAI_API_KEY`
/// - Gemini (Google) - `GEMINI_API_KEY`
/// - OpenRouter (Gateway) - `OPENROUTER_API_KEY`
/// - Grok (xAI) - `XAI_API_KEY`
/// - DeepSeek - `DEEPSEEK_API_KEY`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[default]
    Anthropic,
    #[serde(rename = "openai")]
    OpenAI,
    Gemini,
    OpenRouter,
    Grok,
    DeepSeek,
}

impl LlmProvider {
    /// Get all available providers
    pub fn all() -> Vec<LlmProvider> {
        vec![
            LlmProvider::Anthropic,
            LlmProvider::OpenAI,
            LlmProvider::Gemini,
            LlmProvider::OpenRouter,
            LlmProvider::Grok,
            LlmProvider::DeepSeek,
        ]
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            LlmProvider::Anthropic => "Anthropic",
            LlmProvider::OpenAI => "OpenAI",
            LlmProvider::Gemini => "Gemini",
            LlmProvider::OpenRouter => "OpenRouter",
            LlmProvider::Grok => "Grok",
            LlmProvider::DeepSeek => "DeepSeek",
        }
    }

    /// Environment variable holding the provider API key
    pub fn api_key_env(&self) -> &'static str {
        match self {
            LlmProvider::Anthropic => "ANTHROPIC_API_KEY",
            LlmProvider::OpenAI => "OPENAI_API_KEY",
            LlmProvider::Gemini => "GEMINI_API_KEY",
            LlmProvider::OpenRouter => "OPENROUTER_API_KEY",
            LlmProvider::Grok => "XAI_API_KEY",
            LlmProvider::DeepSeek => "DEEPSEEK_API_KEY",
        }
    }

    /// Default endpoint for the provider's chat API.
    ///
    /// Anthropic uses the Messages API; every other provider speaks the
    /// OpenAI-compatible chat-completions shape (Gemini via its
    /// compatibility endpoint).
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            LlmProvider::Anthropic => "https://api.anthropic.com/v1/messages",
            LlmProvider::OpenAI => "https://api.openai.com/v1/chat/completions",
            LlmProvider::Gemini => {
                "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions"
            }
            LlmProvider::OpenRouter => "https://openrouter.ai/api/v1/chat/completions",
            LlmProvider::Grok => "https://api.x.ai/v1/chat/completions",
            LlmProvider::DeepSeek => "https://api.deepseek.com/v1/chat/completions",
        }
    }

    /// Whether this provider supports custom base URL
    pub fn supports_base_url(&self) -> bool {
        matches!(self, LlmProvider::OpenAI)
    }
}

/// Configuration for LLM model selection
///
/// Used throughout the PageForge pipeline to configure which provider and
/// model the generator transport talks to.
///
/// ## Example
/// ```rust,ignore
/// use pageforge_core::models::{ModelConfig, LlmProvider};
///
/// // Default Anthropic
/// let config = ModelConfig::default();
///
/// // Specific provider and model
/// let config = ModelConfig::with_provider(LlmProvider::OpenAI, "gpt-4o");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// LLM provider to use
    #[serde(default)]
    pub provider: LlmProvider,
    /// Model name (e.g., "claude-sonnet-4-20250514", "gpt-4o")
    pub model: String,
    /// Optional base URL override for OpenAI-compatible APIs
    pub base_url: Option<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::Anthropic,
            model: "claude-sonnet-4-20250514".to_string(),
            base_url: None,
        }
    }
}

impl ModelConfig {
    /// Create a new model config with default provider (Anthropic)
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            provider: LlmProvider::Anthropic,
            model: model.into(),
            base_url: None,
        }
    }

    /// Create config for a specific provider
    pub fn with_provider(provider: LlmProvider, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            base_url: None,
        }
    }

    /// Set base URL (for OpenAI-compatible endpoints)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Resolve the endpoint the transport should call.
    ///
    /// A base URL override replaces the scheme/host part and keeps the
    /// chat-completions path (only honored for providers that support it).
    pub fn endpoint(&self) -> String {
        match &self.base_url {
            Some(base) if self.provider.supports_base_url() => {
                format!("{}/chat/completions", base.trim_end_matches('/'))
            }
            _ => self.provider.default_endpoint().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ModelConfig::default();
        assert_eq!(config.provider, LlmProvider::Anthropic);
        assert!(config.model.contains("claude"));
    }

    #[test]
    fn test_provider_display_names() {
        assert_eq!(LlmProvider::Anthropic.display_name(), "Anthropic");
        assert_eq!(LlmProvider::OpenAI.display_name(), "OpenAI");
    }

    #[test]
    fn test_base_url_support() {
        assert!(LlmProvider::OpenAI.supports_base_url());
        assert!(!LlmProvider::Anthropic.supports_base_url());
    }

    #[test]
    fn test_endpoint_resolution() {
        let config = ModelConfig::with_provider(LlmProvider::OpenAI, "gpt-4o")
            .with_base_url("http://localhost:8080/v1/");
        assert_eq!(config.endpoint(), "http://localhost:8080/v1/chat/completions");

        // Base URL is ignored for providers without support
        let config = ModelConfig::new("claude-sonnet-4-20250514").with_base_url("http://x");
        assert!(config.endpoint().contains("api.anthropic.com"));
    }

    #[test]
    fn test_model_config_serialization() {
        let config = ModelConfig::with_provider(LlmProvider::OpenAI, "gpt-4o");
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("openai"));
        assert!(json.contains("gpt-4o"));
    }
}
