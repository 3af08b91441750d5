//! FAQ knowledge base.
//!
//! Loads the FAQ corpus, ranks entries against a question, grounds an LLM
//! answer in the best matches, and keeps an append-only record of every
//! answered question.

pub mod corpus;
pub mod interactions;
pub mod pipeline;
pub mod rag;
pub mod search;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use corpus::{load_corpus, parse_corpus, CorpusStore};
pub use interactions::InteractionLog;
pub use pipeline::{validate_question, AskStage, FaqService, QUESTION_REQUIRED};
pub use rag::{build_context, AnswerOrchestrator};
pub use search::retrieve_relevant;
pub use types::{AskResponse, FaqDocument, FaqEntry, Interaction, ScoredFaq};
