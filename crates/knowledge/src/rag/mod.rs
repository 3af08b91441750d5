//! Retrieval-augmented answering over the FAQ corpus.

pub mod ask;

pub use ask::{build_context, AnswerOrchestrator};
