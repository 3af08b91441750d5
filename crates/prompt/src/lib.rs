//! Prompt system for faqbot.
//!
//! This crate provides structured prompt management with:
//! - A built-in grounded FAQ answering prompt
//! - YAML prompt overrides in the workspace
//! - Handlebars template rendering

pub mod builder;
pub mod loader;
pub mod types;

// Re-export main types
pub use builder::build_prompt;
pub use loader::{default_answer_prompt, load_answer_prompt, load_prompt, DEFAULT_ANSWER_PROMPT_ID};
pub use types::{BuiltPrompt, BuiltPromptMetadata, PromptDefinition};
