//! Mock LLM provider for offline development and testing.

use crate::client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
use faqbot_core::{AppError, AppResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// What the mock answers with.
#[derive(Debug, Clone)]
enum MockReply {
    /// Summarize the grounding it was given
    Echo,
    /// A fixed answer
    Text(String),
    /// Fail every call with this message
    Fail(String),
}

/// Mock provider.
///
/// Never touches the network. Records how often it was called and the last
/// request it saw, so tests can assert on the prompt and on call counts.
#[derive(Debug)]
pub struct MockLlmClient {
    reply: MockReply,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last_request: Mutex<Option<LlmRequest>>,
}

impl MockLlmClient {
    fn with_reply(reply: MockReply) -> Self {
        Self {
            reply,
            delay: None,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// A mock that answers by describing its prompt. Used by the `mock` provider.
    pub fn echo() -> Self {
        Self::with_reply(MockReply::Echo)
    }

    /// A mock that always answers with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_reply(MockReply::Text(text.into()))
    }

    /// A mock whose every call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_reply(MockReply::Fail(message.into()))
    }

    /// Sleep before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of completions requested so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<LlmRequest> {
        self.last_request
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }

    fn echo_answer(request: &LlmRequest) -> String {
        let question = request
            .prompt
            .lines()
            .find_map(|line| line.strip_prefix("User Question: "))
            .unwrap_or(request.prompt.as_str());
        let grounded = request
            .prompt
            .lines()
            .filter(|line| line.trim_start().starts_with("A: "))
            .count();

        format!(
            "[mock] {} FAQ entr{} available for: {}",
            grounded,
            if grounded == 1 { "y" } else { "ies" },
            question.trim()
        )
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    fn provider_name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let content = match &self.reply {
            MockReply::Echo => Self::echo_answer(request),
            MockReply::Text(text) => text.clone(),
            MockReply::Fail(message) => {
                return Err(AppError::AnswerGenerationFailed(message.clone()))
            }
        };

        tracing::debug!("Mock completion produced {} bytes", content.len());

        Ok(LlmResponse {
            content,
            model: request.model.clone(),
            usage: LlmUsage::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replying_records_calls() {
        let client = MockLlmClient::replying("We open at 9am.");
        assert_eq!(client.call_count(), 0);
        assert!(client.last_request().is_none());

        let response = client
            .complete(&LlmRequest::new("hello", "gpt-4-turbo"))
            .await
            .unwrap();

        assert_eq!(response.content, "We open at 9am.");
        assert_eq!(response.model, "gpt-4-turbo");
        assert_eq!(client.call_count(), 1);
        assert_eq!(client.last_request().unwrap().prompt, "hello");
    }

    #[tokio::test]
    async fn test_failing() {
        let client = MockLlmClient::failing("boom");
        let result = client.complete(&LlmRequest::new("hello", "m")).await;
        assert!(matches!(result, Err(AppError::AnswerGenerationFailed(m)) if m == "boom"));
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_echo_counts_grounding() {
        let prompt = "Relevant information from our FAQ database:\n\n\
                      1. Q: What are your hours?\n   A: 9 to 5.\n\n\
                      User Question: When are you open?\n\nPlease provide a helpful answer.";
        let response = MockLlmClient::echo()
            .complete(&LlmRequest::new(prompt, "m"))
            .await
            .unwrap();
        assert_eq!(
            response.content,
            "[mock] 1 FAQ entry available for: When are you open?"
        );
    }
}
