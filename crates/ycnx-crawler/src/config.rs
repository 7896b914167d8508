//! Configuration for the crawler binary
//!
//! Everything has a default. A TOML file named by `YCNX_CONFIG` may override
//! any subset of the fields.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use ycnx_extractor::ExtractorConfig;
use ycnx_fetcher::{DEFAULT_BASE_URL, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_PDFTOTEXT_BIN};
use ycnx_llm::groq::{DEFAULT_ENDPOINT, DEFAULT_MODEL};

use crate::PacingPolicy;

/// Environment variable naming an optional TOML config file
pub const CONFIG_ENV: &str = "YCNX_CONFIG";

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A field holds an unusable value
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Where period documents come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// URL prefix; the zero-padded period id is appended
    pub base_url: String,

    /// Download timeout (seconds)
    pub fetch_timeout_secs: u64,

    /// Converter binary
    pub pdftotext_bin: String,
}

impl SourceConfig {
    /// Download timeout as a Duration
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            pdftotext_bin: DEFAULT_PDFTOTEXT_BIN.to_string(),
        }
    }
}

/// Extraction service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// OpenAI-compatible API base URL
    pub endpoint: String,

    /// Model name
    pub model: String,

    /// Environment variable holding the API key
    pub api_key_env: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: "GROQ_API_KEY".to_string(),
        }
    }
}

/// Top-level crawler configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// SQLite database file
    pub database_path: PathBuf,

    /// Full history export
    pub history_path: PathBuf,

    /// Latest-record export
    pub latest_path: PathBuf,

    /// First period id to consider
    pub start_period: u64,

    /// Delay after each stored period (seconds); 0 disables it
    pub pacing_secs: u64,

    /// Document source
    pub source: SourceConfig,

    /// Extraction service
    pub llm: LlmConfig,

    /// Extraction pipeline
    pub extractor: ExtractorConfig,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("ycnx_data.db"),
            history_path: PathBuf::from("history_data.json"),
            latest_path: PathBuf::from("latest_data.json"),
            start_period: 1,
            pacing_secs: 5,
            source: SourceConfig::default(),
            llm: LlmConfig::default(),
            extractor: ExtractorConfig::default(),
        }
    }
}

impl CrawlerConfig {
    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: CrawlerConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Defaults, or the file named by `YCNX_CONFIG` when it is set
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Pacing between stored periods
    pub fn pacing(&self) -> PacingPolicy {
        PacingPolicy::from_secs(self.pacing_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start_period == 0 {
            return Err(ConfigError::Invalid("start_period must be at least 1".to_string()));
        }
        if self.source.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("source.base_url must not be empty".to_string()));
        }
        if self.source.fetch_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "source.fetch_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.llm.model.trim().is_empty() {
            return Err(ConfigError::Invalid("llm.model must not be empty".to_string()));
        }
        self.extractor
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("extractor: {}", e)))
    }
}
