//! Grounded answer generation.
//!
//! Turns the retrieved FAQ entries into a context block, renders the answering
//! prompt around it, and makes a single call to the LLM client.

use crate::types::ScoredFaq;
use faqbot_core::{AppConfig, AppError, AppResult, LlmSettings};
use faqbot_llm::{LlmClient, LlmRequest};
use faqbot_prompt::{build_prompt, load_answer_prompt, PromptDefinition};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Context block used when retrieval found nothing.
pub const NO_CONTEXT: &str = "No relevant FAQs found.\n\n";

const CONTEXT_HEADER: &str = "Relevant information from our FAQ database:\n\n";

/// Builds grounded prompts and asks the LLM for an answer.
pub struct AnswerOrchestrator {
    client: Option<Arc<dyn LlmClient>>,
    unavailable_reason: String,
    prompt: PromptDefinition,
    model: String,
    temperature: f32,
    max_tokens: u32,
    timeout: Duration,
}

impl AnswerOrchestrator {
    /// Orchestrator backed by a ready client.
    pub fn new(client: Arc<dyn LlmClient>, prompt: PromptDefinition, settings: &LlmSettings) -> Self {
        Self::build(Some(client), String::new(), prompt, settings)
    }

    /// Orchestrator with no usable client; every call fails with
    /// `AnswerGenerationUnavailable` and nothing is sent anywhere.
    pub fn unavailable(
        reason: impl Into<String>,
        prompt: PromptDefinition,
        settings: &LlmSettings,
    ) -> Self {
        Self::build(None, reason.into(), prompt, settings)
    }

    fn build(
        client: Option<Arc<dyn LlmClient>>,
        unavailable_reason: String,
        prompt: PromptDefinition,
        settings: &LlmSettings,
    ) -> Self {
        Self {
            client,
            unavailable_reason,
            prompt,
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            timeout: Duration::from_secs(settings.timeout_secs),
        }
    }

    /// Build from application config.
    ///
    /// A missing credential is not fatal here: the server still starts and
    /// each ask fails with `AnswerGenerationUnavailable`.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let prompt = load_answer_prompt(&config.workspace)?;
        let api_key = config.resolve_api_key();

        match faqbot_llm::create_client(&config.llm, api_key.as_deref()) {
            Ok(client) => {
                tracing::info!(
                    "Answer generation via {} ({})",
                    client.provider_name(),
                    config.llm.model
                );
                Ok(Self::new(client, prompt, &config.llm))
            }
            Err(AppError::AnswerGenerationUnavailable(reason)) => {
                tracing::warn!("Answer generation unavailable: {}", reason);
                Ok(Self::unavailable(reason, prompt, &config.llm))
            }
            Err(e) => Err(e),
        }
    }

    /// Whether a client is configured.
    pub fn is_available(&self) -> bool {
        self.client.is_some()
    }

    /// Generate an answer for `question` grounded in `faqs`.
    pub async fn generate_answer(&self, question: &str, faqs: &[ScoredFaq]) -> AppResult<String> {
        let client = self.client.as_ref().ok_or_else(|| {
            AppError::AnswerGenerationUnavailable(self.unavailable_reason.clone())
        })?;

        let request = self.build_request(question, faqs)?;

        tracing::debug!(
            "Generating answer with {} grounding entries (provider: {})",
            faqs.len(),
            client.provider_name()
        );

        let response = tokio::time::timeout(self.timeout, client.complete(&request))
            .await
            .map_err(|_| {
                AppError::AnswerGenerationFailed(format!(
                    "no response within {}s",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| match e {
                AppError::AnswerGenerationFailed(_) => e,
                other => AppError::AnswerGenerationFailed(other.to_string()),
            })?;

        if response.content.trim().is_empty() {
            return Err(AppError::AnswerGenerationFailed(
                "provider returned no content".to_string(),
            ));
        }

        tracing::debug!(
            "Token usage - Prompt: {}, Completion: {}, Total: {}",
            response.usage.prompt_tokens,
            response.usage.completion_tokens,
            response.usage.total_tokens
        );

        Ok(response.content)
    }

    fn build_request(&self, question: &str, faqs: &[ScoredFaq]) -> AppResult<LlmRequest> {
        let mut variables = HashMap::new();
        variables.insert("context".to_string(), build_context(faqs));
        variables.insert("question".to_string(), question.to_string());

        let built = build_prompt(&self.prompt, variables)?;
        tracing::debug!("Rendered answer prompt {}", built.metadata.source_prompt_id);

        let mut request = LlmRequest::new(built.user, &self.model)
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens);

        if let Some(system) = built.system {
            request = request.with_system(system);
        }

        Ok(request)
    }
}

/// Render retrieved entries as an enumerated Q/A listing.
pub fn build_context(faqs: &[ScoredFaq]) -> String {
    if faqs.is_empty() {
        return NO_CONTEXT.to_string();
    }

    let mut context = String::from(CONTEXT_HEADER);
    for (i, faq) in faqs.iter().enumerate() {
        context.push_str(&format!(
            "{}. Q: {}\n   A: {}\n\n",
            i + 1,
            faq.entry.question,
            faq.entry.answer
        ));
    }
    context
}
