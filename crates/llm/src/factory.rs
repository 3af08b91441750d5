//! LLM provider factory.
//!
//! Builds an LLM client from the answer generator settings. A provider that
//! needs a credential refuses to build without one, so a missing key is
//! reported before any request is attempted.

use crate::client::LlmClient;
use crate::providers::{MockLlmClient, OpenAiClient};
use crate::types::ProviderType;
use faqbot_core::{AppError, AppResult, LlmSettings};
use std::sync::Arc;
use std::time::Duration;

/// Create an LLM client for the configured provider.
///
/// # Arguments
/// * `settings` - Provider, endpoint, and timeout settings
/// * `api_key` - API key resolved from the environment, if any
///
/// # Errors
/// - `AnswerGenerationUnavailable` if the provider needs a key and none is set
/// - `Config` if the provider is unknown or the HTTP client cannot be built
pub fn create_client(
    settings: &LlmSettings,
    api_key: Option<&str>,
) -> AppResult<Arc<dyn LlmClient>> {
    let provider = ProviderType::parse(&settings.provider).ok_or_else(|| {
        AppError::Config(format!("Unknown provider: {}", settings.provider))
    })?;

    match provider {
        ProviderType::OpenAI => {
            let api_key = api_key.ok_or_else(|| {
                AppError::AnswerGenerationUnavailable(format!(
                    "{} not configured. Set the API key in the environment.",
                    settings.api_key_env
                ))
            })?;
            let client = OpenAiClient::with_base_url(
                &settings.endpoint,
                api_key,
                Duration::from_secs(settings.timeout_secs),
            )?;
            Ok(Arc::new(client))
        }
        ProviderType::Mock => Ok(Arc::new(MockLlmClient::echo())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_openai_client() {
        let client = create_client(&LlmSettings::default(), Some("sk-test")).unwrap();
        assert_eq!(client.provider_name(), "openai");
    }

    #[test]
    fn test_openai_requires_api_key() {
        match create_client(&LlmSettings::default(), None) {
            Err(AppError::AnswerGenerationUnavailable(msg)) => {
                assert!(msg.contains("OPENAI_API_KEY"))
            }
            Err(other) => panic!("Unexpected error: {other}"),
            Ok(_) => panic!("Expected error for OpenAI without API key"),
        }
    }

    #[test]
    fn test_mock_needs_no_key() {
        let settings = LlmSettings {
            provider: "mock".to_string(),
            ..LlmSettings::default()
        };
        let client = create_client(&settings, None).unwrap();
        assert_eq!(client.provider_name(), "mock");
    }

    #[test]
    fn test_unknown_provider() {
        let settings = LlmSettings {
            provider: "unknown".to_string(),
            ..LlmSettings::default()
        };
        assert!(matches!(
            create_client(&settings, Some("key")),
            Err(AppError::Config(_))
        ));
    }
}
