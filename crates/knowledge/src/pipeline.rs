//! The ask pipeline: validate → retrieve → generate → log → respond.
//!
//! Stages run strictly in order. Validation happens before any I/O, and the
//! interaction log is only written after a successful answer; a failed log
//! write never changes the response.

use crate::corpus::CorpusStore;
use crate::interactions::InteractionLog;
use crate::rag::AnswerOrchestrator;
use crate::search::retrieve_relevant;
use crate::types::{AskResponse, Interaction};
use chrono::{SecondsFormat, Utc};
use faqbot_core::{AppConfig, AppError, AppResult};
use serde_json::Value;
use std::fmt;
use tracing::Instrument;

/// Message returned for a missing or blank question.
pub const QUESTION_REQUIRED: &str = "Question is required";

/// Pipeline stage, recorded on the request span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AskStage {
    Validating,
    Retrieving,
    Generating,
    Logging,
    Responding,
}

impl fmt::Display for AskStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validating => "validating",
            Self::Retrieving => "retrieving",
            Self::Generating => "generating",
            Self::Logging => "logging",
            Self::Responding => "responding",
        };
        f.write_str(name)
    }
}

/// Check the raw `question` field of a request body.
///
/// Returns the question untrimmed; it must be a string with non-whitespace content.
pub fn validate_question(question: Option<&Value>) -> AppResult<&str> {
    match question {
        Some(Value::String(text)) if !text.trim().is_empty() => Ok(text.as_str()),
        _ => Err(AppError::InvalidInput(QUESTION_REQUIRED.to_string())),
    }
}

/// Current instant in the interaction log's timestamp format.
fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn enter(stage: AskStage) {
    tracing::Span::current().record("stage", tracing::field::display(stage));
    tracing::debug!("Ask stage: {}", stage);
}

/// The FAQ answering service behind `/ask`.
pub struct FaqService {
    corpus: CorpusStore,
    answerer: AnswerOrchestrator,
    interactions: InteractionLog,
    top_n: usize,
}

impl FaqService {
    pub fn new(
        corpus: CorpusStore,
        answerer: AnswerOrchestrator,
        interactions: InteractionLog,
        top_n: usize,
    ) -> Self {
        Self {
            corpus,
            answerer,
            interactions,
            top_n,
        }
    }

    /// Wire up the service from application config.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let corpus = CorpusStore::new(config.corpus_file(), config.corpus_reload);
        let answerer = AnswerOrchestrator::from_config(config)?;
        let interactions = InteractionLog::new(config.interaction_log_file());

        tracing::info!(
            "FAQ corpus: {:?} ({:?} reload), interaction log: {:?}",
            corpus.path(),
            config.corpus_reload,
            interactions.path()
        );

        Ok(Self::new(corpus, answerer, interactions, config.top_n))
    }

    pub fn answer_available(&self) -> bool {
        self.answerer.is_available()
    }

    /// Answer one question.
    ///
    /// `question` is the raw `question` field of the request body, if any.
    pub async fn ask(&self, question: Option<&Value>) -> AppResult<AskResponse> {
        let span = tracing::info_span!("ask", stage = tracing::field::Empty);
        self.run(question).instrument(span).await
    }

    async fn run(&self, question: Option<&Value>) -> AppResult<AskResponse> {
        enter(AskStage::Validating);
        let raw_question = validate_question(question)?;
        let question = raw_question.trim();

        enter(AskStage::Retrieving);
        let faqs = self.corpus.snapshot().await?;
        let retrieved_faqs = retrieve_relevant(raw_question, &faqs, self.top_n);
        tracing::info!(
            "Retrieved {} FAQ entries: {:?}",
            retrieved_faqs.len(),
            retrieved_faqs.iter().map(|f| f.id()).collect::<Vec<_>>()
        );

        enter(AskStage::Generating);
        let answer = self.answerer.generate_answer(question, &retrieved_faqs).await?;

        enter(AskStage::Logging);
        let interaction = Interaction {
            timestamp: now_timestamp(),
            question: question.to_string(),
            retrieved_faq_ids: retrieved_faqs.iter().map(|f| f.id().to_string()).collect(),
            answer,
        };
        self.interactions.record(&interaction).await;

        enter(AskStage::Responding);
        Ok(AskResponse {
            answer: interaction.answer,
            retrieved_faqs,
            timestamp: interaction.timestamp,
        })
    }
}
