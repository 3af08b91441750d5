//! Error types for faqbot.
//!
//! This module defines a unified error enum covering the failure taxonomy of
//! the ask pipeline (validation, corpus, answer generation, interaction log)
//! plus the ambient configuration, I/O, prompt, and serialization errors.

use thiserror::Error;

/// Unified error type for faqbot.
///
/// All library functions return `Result<T, AppError>`.
/// We never panic: errors must be represented and propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// The caller sent a question we cannot work with
    #[error("{0}")]
    InvalidInput(String),

    /// The FAQ corpus is missing or malformed
    #[error("FAQ corpus unavailable: {0}")]
    CorpusUnavailable(String),

    /// No credential or configuration for the answer generator
    #[error("Answer generation unavailable: {0}")]
    AnswerGenerationUnavailable(String),

    /// The answer generator errored, timed out, or returned nothing
    #[error("Answer generation failed: {0}")]
    AnswerGenerationFailed(String),

    /// Writing the interaction log failed (observed, never surfaced)
    #[error("Interaction logging failed: {0}")]
    LoggingFailed(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Prompt system errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Stable, machine-readable identifier for this error.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::CorpusUnavailable(_) => "corpus_unavailable",
            Self::AnswerGenerationUnavailable(_) => "answer_generation_unavailable",
            Self::AnswerGenerationFailed(_) => "answer_generation_failed",
            Self::LoggingFailed(_) => "logging_failed",
            Self::Config(_) | Self::Io(_) | Self::Prompt(_) | Self::Serialization(_) => {
                "internal_error"
            }
        }
    }

    /// Whether the caller can fix this error by changing the request.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
