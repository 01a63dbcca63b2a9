//! # Generator Transport
//!
//! The single contract every pipeline phase uses to talk to the LLM:
//! a system prompt plus one user message in, raw text plus token usage out.
//! JSON output contracts live in the system prompts, not in the transport,
//! so every phase parses defensively and falls back on its own.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;
use thiserror::Error;

pub mod http;
#[cfg(test)]
pub mod mock;

pub use http::HttpGenerator;

/// One generator invocation.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub system_prompt: String,
    pub user_message: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl GenerationRequest {
    pub fn new(system_prompt: impl Into<String>, user_message: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_message: user_message.into(),
            max_tokens: 4096,
            temperature: 0.7,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Token accounting for a single call, summable across a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

impl AddAssign for TokenUsage {
    fn add_assign(&mut self, rhs: Self) {
        self.input_tokens += rhs.input_tokens;
        self.output_tokens += rhs.output_tokens;
    }
}

/// What came back from the generator.
#[derive(Debug, Clone)]
pub struct GenerationResponse {
    pub text: String,
    pub usage: TokenUsage,
}

/// Transport-level failures. These are fatal to a pipeline run; malformed
/// JSON inside a successful response is not (see `skills::decode`).
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("missing API key: set {0}")]
    MissingApiKey(&'static str),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("provider returned an empty response")]
    EmptyResponse,
}

/// The generator call contract shared by all four pipeline phases.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GeneratorError>;
}
