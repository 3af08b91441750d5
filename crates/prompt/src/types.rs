//! Prompt types for faqbot.

use serde::{Deserialize, Serialize};

/// A prompt definition: fixed role instruction plus a user-turn template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptDefinition {
    /// Unique prompt identifier
    pub id: String,

    /// Human-readable title
    pub title: String,

    /// API version for schema evolution
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// System (role) instruction, Handlebars syntax allowed
    pub system: String,

    /// User-turn template with Handlebars syntax
    pub template: String,
}

/// A fully built prompt ready for LLM execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltPrompt {
    /// System message
    pub system: Option<String>,

    /// User message (required)
    pub user: String,

    /// Metadata about the built prompt
    pub metadata: BuiltPromptMetadata,
}

/// Metadata about a built prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltPromptMetadata {
    /// Source prompt ID
    #[serde(rename = "sourcePromptId")]
    pub source_prompt_id: String,
}

impl BuiltPrompt {
    /// Create a new built prompt.
    pub fn new(system: Option<String>, user: String, source_prompt_id: String) -> Self {
        Self {
            system,
            user,
            metadata: BuiltPromptMetadata { source_prompt_id },
        }
    }
}
