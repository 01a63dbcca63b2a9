//! Scripted generator for tests. Replays queued responses in order and
//! records every request so tests can assert on prompt contents and call
//! counts without touching the network.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::{GenerationRequest, GenerationResponse, GeneratorError, TextGenerator, TokenUsage};

enum Scripted {
    Text(String),
    Error(GeneratorError),
}

#[derive(Default)]
pub struct MockGenerator {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<GenerationRequest>>,
    /// Returned when the script runs dry; defaults to empty-response error.
    exhausted_text: Option<String>,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful text response.
    pub fn push_text(self, text: impl Into<String>) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Text(text.into()));
        self
    }

    /// Queue a transport failure.
    pub fn push_error(self, error: GeneratorError) -> Self {
        self.script.lock().unwrap().push_back(Scripted::Error(error));
        self
    }

    /// Any call past the end of the script returns this text instead of
    /// failing. Useful for section loops of unknown length.
    pub fn with_exhausted_text(mut self, text: impl Into<String>) -> Self {
        self.exhausted_text = Some(text.into());
        self
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn request(&self, index: usize) -> Option<GenerationRequest> {
        self.requests.lock().unwrap().get(index).cloned()
    }

    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GeneratorError> {
        self.requests.lock().unwrap().push(request.clone());

        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Text(text)) => Ok(GenerationResponse {
                text,
                usage: TokenUsage {
                    input_tokens: 100,
                    output_tokens: 50,
                },
            }),
            Some(Scripted::Error(error)) => Err(error),
            None => match &self.exhausted_text {
                Some(text) => Ok(GenerationResponse {
                    text: text.clone(),
                    usage: TokenUsage {
                        input_tokens: 100,
                        output_tokens: 50,
                    },
                }),
                None => Err(GeneratorError::EmptyResponse),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_replays_in_order() {
        let mock = MockGenerator::new().push_text("one").push_text("two");
        let req = GenerationRequest::new("s", "u");

        assert_eq!(mock.generate(&req).await.unwrap().text, "one");
        assert_eq!(mock.generate(&req).await.unwrap().text, "two");
        assert!(mock.generate(&req).await.is_err());
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test]
    async fn test_mock_exhausted_text() {
        let mock = MockGenerator::new().with_exhausted_text("filler");
        let req = GenerationRequest::new("s", "u");
        assert_eq!(mock.generate(&req).await.unwrap().text, "filler");
    }
}
