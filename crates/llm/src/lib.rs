//! LLM integration crate for faqbot.
//!
//! This crate provides a provider-agnostic abstraction for the generative
//! answering step. The answer orchestrator only sees the `LlmClient` trait.
//!
//! # Providers
//! - **OpenAI**: any OpenAI-compatible chat completions endpoint (default)
//! - **Mock**: offline provider for development and tests
//!
//! # Example
//! ```no_run
//! use faqbot_llm::{LlmClient, LlmRequest, providers::OpenAiClient};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAiClient::new("sk-...", Duration::from_secs(30))?;
//! let request = LlmRequest::new("Hello, world!", "gpt-4-turbo");
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;
pub mod types;

// Re-export main types
pub use client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use factory::create_client;
pub use providers::{MockLlmClient, OpenAiClient};
pub use types::ProviderType;
