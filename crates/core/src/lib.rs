//! faqbot core library
//!
//! This crate provides the foundational utilities shared by every faqbot crate:
//! - Error taxonomy (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration management

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::{AppConfig, CorpusReload, LlmSettings, DEFAULT_TOP_N};
pub use error::{AppError, AppResult};
