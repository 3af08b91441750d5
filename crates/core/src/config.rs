//! Configuration management for faqbot.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Built-in defaults
//! - Config file (`.faqbot/config.yaml` inside the workspace, or `FAQBOT_CONFIG`)
//! - Environment variables
//! - Command-line flags
//!
//! Relative corpus and log paths are resolved against the workspace root.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Number of FAQ entries handed to the answer generator unless configured.
pub const DEFAULT_TOP_N: usize = 2;

/// Providers the answer generator knows how to build.
pub const KNOWN_PROVIDERS: [&str; 2] = ["openai", "mock"];

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains `data/` and `.faqbot/`)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Socket address the HTTP server binds to
    pub bind: String,

    /// FAQ corpus document, relative to the workspace unless absolute
    pub corpus_path: PathBuf,

    /// When the corpus is re-read from disk
    pub corpus_reload: CorpusReload,

    /// Number of FAQ entries handed to the answer generator
    pub top_n: usize,

    /// Append-only interaction log, relative to the workspace unless absolute
    pub interaction_log_path: PathBuf,

    /// Answer generator settings
    pub llm: LlmSettings,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Corpus reload policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorpusReload {
    /// Re-read the corpus on every request
    #[default]
    Always,
    /// Keep the first successfully loaded snapshot until invalidated
    Cached,
}

/// Settings for the generative-answer collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Provider identifier ("openai", "mock")
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Base URL of the chat completions API
    pub endpoint: String,

    /// Name of the environment variable holding the API key
    pub api_key_env: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Upper bound on generated tokens
    pub max_tokens: u32,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4-turbo".to_string(),
            endpoint: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            temperature: 0.7,
            max_tokens: 500,
            timeout_secs: 30,
        }
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    server: Option<ServerSection>,
    corpus: Option<CorpusSection>,
    interactions: Option<InteractionsSection>,
    llm: Option<LlmSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ServerSection {
    bind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CorpusSection {
    path: Option<PathBuf>,
    reload: Option<CorpusReload>,
    #[serde(rename = "topN")]
    top_n: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct InteractionsSection {
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LlmSection {
    provider: Option<String>,
    model: Option<String>,
    endpoint: Option<String>,
    #[serde(rename = "apiKeyEnv")]
    api_key_env: Option<String>,
    temperature: Option<f32>,
    #[serde(rename = "maxTokens")]
    max_tokens: Option<u32>,
    #[serde(rename = "timeoutSecs")]
    timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            bind: "127.0.0.1:3000".to_string(),
            corpus_path: PathBuf::from("data/faqs.json"),
            corpus_reload: CorpusReload::Always,
            top_n: DEFAULT_TOP_N,
            interaction_log_path: PathBuf::from("data/logs/interactions.jsonl"),
            llm: LlmSettings::default(),
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration, letting explicit paths win over the environment.
    ///
    /// Environment variables:
    /// - `FAQBOT_WORKSPACE`: Override workspace path
    /// - `FAQBOT_CONFIG`: Path to config file
    /// - `FAQBOT_BIND`: Listen address
    /// - `FAQBOT_PROVIDER`: Answer generator provider
    /// - `FAQBOT_MODEL`: Model identifier
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use faqbot_core::config::AppConfig;
    ///
    /// let config = AppConfig::load_from(None, None).expect("Failed to load config");
    /// println!("Corpus: {:?}", config.corpus_file());
    /// ```
    pub fn load_from(workspace: Option<PathBuf>, config_file: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(workspace) = workspace.or_else(|| env_path("FAQBOT_WORKSPACE")) {
            config.workspace = workspace;
        }

        config.config_file = config_file.or_else(|| env_path("FAQBOT_CONFIG"));

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = match config.config_file {
            Some(ref cf) => cf.clone(),
            None => config.workspace.join(".faqbot/config.yaml"),
        };

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        } else if config.config_file.is_some() {
            return Err(AppError::Config(format!(
                "Config file does not exist: {:?}",
                config_path
            )));
        }

        // Environment variables override YAML config
        if let Ok(bind) = std::env::var("FAQBOT_BIND") {
            config.bind = bind;
        }

        if let Ok(provider) = std::env::var("FAQBOT_PROVIDER") {
            config.llm.provider = provider;
        }

        if let Ok(model) = std::env::var("FAQBOT_MODEL") {
            config.llm.model = model;
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        Ok(self.clone().merged(config_file))
    }

    fn merged(mut self, file: ConfigFile) -> Self {
        if let Some(bind) = file.server.and_then(|s| s.bind) {
            self.bind = bind;
        }

        if let Some(corpus) = file.corpus {
            if let Some(path) = corpus.path {
                self.corpus_path = path;
            }
            if let Some(reload) = corpus.reload {
                self.corpus_reload = reload;
            }
            if let Some(top_n) = corpus.top_n {
                self.top_n = top_n;
            }
        }

        if let Some(path) = file.interactions.and_then(|i| i.path) {
            self.interaction_log_path = path;
        }

        if let Some(llm) = file.llm {
            let settings = &mut self.llm;
            if let Some(provider) = llm.provider {
                settings.provider = provider;
            }
            if let Some(model) = llm.model {
                settings.model = model;
            }
            if let Some(endpoint) = llm.endpoint {
                settings.endpoint = endpoint;
            }
            if let Some(api_key_env) = llm.api_key_env {
                settings.api_key_env = api_key_env;
            }
            if let Some(temperature) = llm.temperature {
                settings.temperature = temperature;
            }
            if let Some(max_tokens) = llm.max_tokens {
                settings.max_tokens = max_tokens;
            }
            if let Some(timeout_secs) = llm.timeout_secs {
                settings.timeout_secs = timeout_secs;
            }
        }

        if let Some(logging) = file.logging {
            if let Some(level) = logging.level {
                self.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                self.no_color = !color;
            }
        }

        self
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over environment variables and the config file.
    pub fn with_overrides(
        mut self,
        bind: Option<String>,
        provider: Option<String>,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(bind) = bind {
            self.bind = bind;
        }

        if let Some(provider) = provider {
            self.llm.provider = provider;
        }

        if let Some(model) = model {
            self.llm.model = model;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Absolute location of the FAQ corpus document.
    pub fn corpus_file(&self) -> PathBuf {
        self.resolve(&self.corpus_path)
    }

    /// Absolute location of the interaction log.
    pub fn interaction_log_file(&self) -> PathBuf {
        self.resolve(&self.interaction_log_path)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace.join(path)
        }
    }

    /// Resolve the answer generator API key from the environment.
    ///
    /// Blank values count as missing.
    pub fn resolve_api_key(&self) -> Option<String> {
        std::env::var(&self.llm.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    /// Validate the merged configuration.
    pub fn validate(&self) -> AppResult<()> {
        let provider = self.llm.provider.to_lowercase();
        if !KNOWN_PROVIDERS.contains(&provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.llm.provider,
                KNOWN_PROVIDERS.join(", ")
            )));
        }

        if self.top_n == 0 {
            return Err(AppError::Config("topN must be at least 1".to_string()));
        }

        if self.llm.timeout_secs == 0 {
            return Err(AppError::Config(
                "LLM timeout must be greater than zero".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(AppError::Config(format!(
                "Temperature out of range (0.0-2.0): {}",
                self.llm.temperature
            )));
        }

        Ok(())
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var(name).ok().map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.llm.model, "gpt-4-turbo");
        assert_eq!(config.llm.max_tokens, 500);
        assert_eq!(config.top_n, DEFAULT_TOP_N);
        assert_eq!(DEFAULT_TOP_N, 2);
        assert_eq!(config.corpus_reload, CorpusReload::Always);
        assert!(!config.verbose);
    }

    #[test]
    fn test_paths_resolve_against_workspace() {
        let mut config = AppConfig::default();
        config.workspace = PathBuf::from("/srv/faq");
        assert_eq!(config.corpus_file(), PathBuf::from("/srv/faq/data/faqs.json"));
        assert_eq!(
            config.interaction_log_file(),
            PathBuf::from("/srv/faq/data/logs/interactions.jsonl")
        );

        config.corpus_path = PathBuf::from("/etc/faqs.json");
        assert_eq!(config.corpus_file(), PathBuf::from("/etc/faqs.json"));
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default().with_overrides(
            Some("0.0.0.0:8080".to_string()),
            Some("mock".to_string()),
            Some("gpt-4o".to_string()),
            None,
            true,
            false,
        );

        assert_eq!(config.bind, "0.0.0.0:8080");
        assert_eq!(config.llm.provider, "mock");
        assert_eq!(config.llm.model, "gpt-4o");
        assert!(config.verbose);
        assert_eq!(config.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_merge_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(
            &path,
            r#"
server:
  bind: "0.0.0.0:9000"
corpus:
  path: faq/corpus.json
  reload: cached
  topN: 3
llm:
  model: gpt-4o-mini
  apiKeyEnv: MY_KEY
  timeoutSecs: 5
logging:
  color: false
"#,
        )
        .unwrap();

        let config = AppConfig::default().merge_yaml(&path).unwrap();
        assert_eq!(config.bind, "0.0.0.0:9000");
        assert_eq!(config.corpus_path, PathBuf::from("faq/corpus.json"));
        assert_eq!(config.corpus_reload, CorpusReload::Cached);
        assert_eq!(config.top_n, 3);
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.api_key_env, "MY_KEY");
        assert_eq!(config.llm.timeout_secs, 5);
        assert_eq!(config.llm.provider, "openai");
        assert!(config.no_color);
    }

    #[test]
    fn test_merge_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, "corpus: [unclosed").unwrap();
        assert!(matches!(
            AppConfig::default().merge_yaml(&path),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_resolve_api_key_ignores_blank() {
        let mut config = AppConfig::default();
        config.llm.api_key_env = "FAQBOT_TEST_BLANK_KEY".to_string();
        std::env::set_var("FAQBOT_TEST_BLANK_KEY", "   ");
        assert_eq!(config.resolve_api_key(), None);

        config.llm.api_key_env = "FAQBOT_TEST_UNSET_KEY".to_string();
        assert_eq!(config.resolve_api_key(), None);
    }

    #[test]
    fn test_validate_unknown_provider() {
        let mut config = AppConfig::default();
        config.llm.provider = "unknown".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_top_n() {
        let mut config = AppConfig::default();
        config.top_n = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_defaults() {
        assert!(AppConfig::default().validate().is_ok());
    }
}
