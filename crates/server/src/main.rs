//! faqbot server
//!
//! Answers customer questions over HTTP, grounded in a local FAQ corpus.

mod routes;
mod server;

use clap::Parser;
use faqbot_core::{config::AppConfig, logging, AppResult};
use faqbot_knowledge::FaqService;
use std::path::PathBuf;
use std::sync::Arc;

/// faqbot - FAQ question answering over HTTP
#[derive(Parser, Debug)]
#[command(name = "faqbot")]
#[command(about = "Answer questions from a FAQ corpus with a grounded LLM", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, env = "FAQBOT_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, env = "FAQBOT_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on (default: 127.0.0.1:3000)
    #[arg(short, long, env = "FAQBOT_BIND")]
    bind: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    no_color: bool,

    /// LLM provider (openai, mock)
    #[arg(short, long, env = "FAQBOT_PROVIDER")]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long, env = "FAQBOT_MODEL")]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    let config = AppConfig::load_from(cli.workspace, cli.config)?.with_overrides(
        cli.bind,
        cli.provider,
        cli.model,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;
    config.validate()?;

    tracing::info!("faqbot {} starting", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Provider: {}", config.llm.provider);
    tracing::debug!("Model: {}", config.llm.model);

    let service = Arc::new(FaqService::from_config(&config)?);

    let result = server::run(service, &config.bind).await;

    match &result {
        Ok(_) => tracing::info!("Server stopped"),
        Err(e) => tracing::error!("Server failed: {}", e),
    }

    result
}
