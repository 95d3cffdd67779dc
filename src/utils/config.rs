//! Configuration for RAGBot
//!
//! Settings come from three layers, later ones winning:
//!
//! 1. Built-in defaults (every field has one)
//! 2. An optional TOML file (`ragbot.toml`)
//! 3. Environment variables, including a `.env` file loaded with dotenvy
//!
//! Secrets are never written to the TOML file. The `[llm]` section names the
//! environment variables that hold the API key and model instead.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Root configuration structure loaded from ragbot.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub rag: RagConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub feedback: FeedbackConfig,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Default tracing filter; `RUST_LOG` takes precedence when set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Largest accepted request body (PDF uploads)
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_upload_bytes() -> usize {
    50 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

// ============= RAG Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagConfig {
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Directory for the embedding model download cache
    #[serde(default)]
    pub model_cache_dir: Option<PathBuf>,

    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    /// Number of chunks retrieved per query
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Where uploaded PDFs are kept
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,
}

fn default_embedding_model() -> String {
    "sentence-transformers/all-MiniLM-L6-v2".to_string()
}

fn default_chunk_size() -> usize {
    1000
}

fn default_chunk_overlap() -> usize {
    200
}

fn default_top_k() -> usize {
    ragbot_vector::DEFAULT_K
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("./data/index.snapshot.json")
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            embedding_model: default_embedding_model(),
            model_cache_dir: None,
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            top_k: default_top_k(),
            data_dir: default_data_dir(),
            snapshot_path: default_snapshot_path(),
        }
    }
}

// ============= LLM Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// OpenAI-compatible API base, without the `/chat/completions` suffix
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Environment variable containing the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Environment variable containing the model name
    #[serde(default = "default_model_env")]
    pub model_env: String,
}

fn default_api_base() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_api_key_env() -> String {
    "GROQ_API_KEY".to_string()
}

fn default_model_env() -> String {
    "GROQ_MODEL".to_string()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            api_key_env: default_api_key_env(),
            model_env: default_model_env(),
        }
    }
}

/// API credentials resolved from the environment.
#[derive(Debug, Clone, Default)]
pub struct LlmCredentials {
    pub api_key: String,
    pub model: String,
}

impl LlmConfig {
    /// Read the API key and model from the configured environment variables.
    ///
    /// Missing values are logged and left empty: ingestion does not need the
    /// LLM, and the chat endpoint will reject an empty key on first use.
    pub fn credentials(&self) -> LlmCredentials {
        let api_key = env::var(&self.api_key_env).unwrap_or_else(|_| {
            warn!(var = %self.api_key_env, "LLM API key not set; queries will fail");
            String::new()
        });
        let model = env::var(&self.model_env).unwrap_or_else(|_| {
            warn!(var = %self.model_env, "LLM model not set; queries will fail");
            String::new()
        });
        LlmCredentials { api_key, model }
    }
}

// ============= Feedback Configuration =============

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedbackConfig {
    /// JSON-lines file for feedback records. When unset, feedback is only logged.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

// ============= Configuration Loading & Validation =============

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid value for {var}: {value}")]
    InvalidEnv { var: String, value: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigError> for crate::types::AppError {
    fn from(e: ConfigError) -> Self {
        crate::types::AppError::Configuration(e.to_string())
    }
}

/// Where the file layer of a loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Defaults => write!(f, "built-in defaults"),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// A missing file is fine when `required` is false (built-in defaults are
    /// used); an explicitly requested file must exist. Loading happens before
    /// logging is configured, so the source is returned for the caller to log.
    pub fn load<P: AsRef<Path>>(
        path: P,
        required: bool,
    ) -> Result<(Self, ConfigSource), ConfigError> {
        dotenvy::dotenv().ok();

        let path = path.as_ref();
        let (mut config, source) = if path.exists() {
            let config = Self::from_toml_str(&std::fs::read_to_string(path)?)?;
            (config, ConfigSource::File(path.to_path_buf()))
        } else if required {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        } else {
            (Config::default(), ConfigSource::Defaults)
        };

        config.apply_env_overrides(|var| env::var(var).ok())?;
        config.validate()?;
        Ok((config, source))
    }

    /// Parse configuration from a TOML string without touching the environment.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply environment overrides, reading variables through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidEnv {
                var: "PORT".to_string(),
                value: port.clone(),
            })?;
        }
        if let Some(api_base) = lookup("GROQ_API_BASE") {
            self.llm.api_base = api_base;
        }
        if let Some(dir) = lookup("RAGBOT_DATA_DIR") {
            self.rag.data_dir = PathBuf::from(dir);
        }
        if let Some(path) = lookup("RAGBOT_SNAPSHOT_PATH") {
            self.rag.snapshot_path = PathBuf::from(path);
        }
        Ok(())
    }

    /// Validate value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rag = &self.rag;
        if rag.chunk_size == 0 {
            return Err(ConfigError::ValidationError(
                "rag.chunk_size must be greater than 0".to_string(),
            ));
        }
        if rag.chunk_overlap >= rag.chunk_size {
            return Err(ConfigError::ValidationError(format!(
                "rag.chunk_overlap ({}) must be smaller than rag.chunk_size ({})",
                rag.chunk_overlap, rag.chunk_size
            )));
        }
        if rag.top_k == 0 {
            return Err(ConfigError::ValidationError(
                "rag.top_k must be greater than 0".to_string(),
            ));
        }
        if self.llm.api_base.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "llm.api_base must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
