//! Prompt builder for rendering templates.

use crate::types::{BuiltPrompt, PromptDefinition};
use faqbot_core::{AppError, AppResult};
use handlebars::Handlebars;
use std::collections::HashMap;

/// Build a prompt from a definition and input variables.
///
/// Renders both the system instruction and the user template with Handlebars.
/// HTML escaping is disabled: FAQ text goes to the model verbatim.
///
/// # Example
/// ```no_run
/// use faqbot_prompt::{build_prompt, default_answer_prompt};
/// use std::collections::HashMap;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut vars = HashMap::new();
/// vars.insert("context".to_string(), "No relevant FAQs found.\n\n".to_string());
/// vars.insert("question".to_string(), "What are your hours?".to_string());
///
/// let built = build_prompt(&default_answer_prompt(), vars)?;
/// println!("User prompt: {}", built.user);
/// # Ok(())
/// # }
/// ```
pub fn build_prompt(
    definition: &PromptDefinition,
    variables: HashMap<String, String>,
) -> AppResult<BuiltPrompt> {
    tracing::debug!("Building prompt: {}", definition.id);

    let system = render_template(&definition.system, &variables)?;
    let user = render_template(&definition.template, &variables)?;

    let system = if system.trim().is_empty() {
        None
    } else {
        Some(system)
    };

    Ok(BuiltPrompt::new(system, user, definition.id.clone()))
}

/// Render a Handlebars template with variables.
fn render_template(template: &str, variables: &HashMap<String, String>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Disable HTML escaping for plain text
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    handlebars
        .render("prompt", variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))
}
