//! Prompt loader for YAML prompt definitions.
//!
//! A workspace may override a prompt by placing `<id>.yml` in
//! `.faqbot/prompts/`. Without an override the built-in definition is used.

use crate::types::PromptDefinition;
use faqbot_core::{AppError, AppResult};
use std::path::Path;

/// Identifier of the built-in FAQ answering prompt.
pub const DEFAULT_ANSWER_PROMPT_ID: &str = "faq.answer.default";

const DEFAULT_SYSTEM: &str = "You are a helpful assistant answering questions from our FAQ. \
Answer the user's question based on the provided FAQ information.\n\
Be clear, professional, and concise. If the FAQs don't contain enough information to fully \
answer the question, acknowledge this and provide the best guidance you can based on what's \
available.";

const DEFAULT_TEMPLATE: &str = "{{context}}User Question: {{question}}\n\n\
Please provide a helpful answer based on the information above.";

/// The built-in FAQ answering prompt.
pub fn default_answer_prompt() -> PromptDefinition {
    PromptDefinition {
        id: DEFAULT_ANSWER_PROMPT_ID.to_string(),
        title: "Grounded FAQ answer".to_string(),
        api_version: "1.0".to_string(),
        system: DEFAULT_SYSTEM.to_string(),
        template: DEFAULT_TEMPLATE.to_string(),
    }
}

/// Load a prompt definition by ID from the workspace.
///
/// Searches for `<id>.yml` in the `.faqbot/prompts/` directory.
///
/// # Example
/// ```no_run
/// use faqbot_prompt::load_prompt;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let prompt = load_prompt(Path::new("."), "faq.answer.default")?;
/// println!("Loaded prompt: {}", prompt.title);
/// # Ok(())
/// # }
/// ```
pub fn load_prompt(workspace_path: &Path, prompt_id: &str) -> AppResult<PromptDefinition> {
    let prompt_file = prompt_path(workspace_path, prompt_id);

    tracing::debug!("Loading prompt from: {:?}", prompt_file);

    if !prompt_file.exists() {
        return Err(AppError::Prompt(format!(
            "Prompt file not found: {:?}",
            prompt_file
        )));
    }

    let contents = std::fs::read_to_string(&prompt_file).map_err(|e| {
        AppError::Prompt(format!(
            "Failed to read prompt file {:?}: {}",
            prompt_file, e
        ))
    })?;

    let definition: PromptDefinition = serde_yaml::from_str(&contents).map_err(|e| {
        AppError::Prompt(format!(
            "Failed to parse prompt YAML {:?}: {}",
            prompt_file, e
        ))
    })?;

    validate_prompt(&definition)?;

    tracing::info!("Loaded prompt: {} ({})", definition.id, definition.title);

    Ok(definition)
}

/// Load the answering prompt, preferring a workspace override.
///
/// An override that exists but is invalid is an error rather than a silent
/// fallback.
pub fn load_answer_prompt(workspace_path: &Path) -> AppResult<PromptDefinition> {
    if prompt_path(workspace_path, DEFAULT_ANSWER_PROMPT_ID).exists() {
        load_prompt(workspace_path, DEFAULT_ANSWER_PROMPT_ID)
    } else {
        tracing::debug!("Using built-in prompt {}", DEFAULT_ANSWER_PROMPT_ID);
        Ok(default_answer_prompt())
    }
}

fn prompt_path(workspace_path: &Path, prompt_id: &str) -> std::path::PathBuf {
    workspace_path
        .join(".faqbot/prompts")
        .join(format!("{}.yml", prompt_id))
}

/// Validate a prompt definition.
fn validate_prompt(def: &PromptDefinition) -> AppResult<()> {
    if def.id.is_empty() {
        return Err(AppError::Prompt("Prompt ID cannot be empty".to_string()));
    }

    if def.title.is_empty() {
        return Err(AppError::Prompt("Prompt title cannot be empty".to_string()));
    }

    if def.template.is_empty() {
        return Err(AppError::Prompt(
            "Prompt template cannot be empty".to_string(),
        ));
    }

    if !def.api_version.contains('.') {
        return Err(AppError::Prompt(format!(
            "Invalid apiVersion format: {}. Expected format: 'x.y'",
            def.api_version
        )));
    }

    Ok(())
}
