//! Configuration for the Extractor

use crate::error::ExtractorError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use ycnx_domain::record::BATCH_PREFIX;

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Prefix of synthesized batch numbers
    pub batch_prefix: String,

    /// Maximum input text length (characters)
    pub max_text_length: usize,

    /// Caller-side limit on the LLM call (seconds); unset leaves it to the service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction_timeout_secs: Option<u64>,
}

impl ExtractorConfig {
    /// Get the extraction timeout as a Duration, if one is set
    pub fn extraction_timeout(&self) -> Option<Duration> {
        self.extraction_timeout_secs.map(Duration::from_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ExtractorError> {
        if self.max_text_length == 0 {
            return Err(ExtractorError::Config(
                "max_text_length must be greater than 0".to_string(),
            ));
        }
        if self.extraction_timeout_secs == Some(0) {
            return Err(ExtractorError::Config(
                "extraction_timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        toml::from_str(toml_str)
            .map_err(|e| ExtractorError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ExtractorError> {
        toml::to_string_pretty(self)
            .map_err(|e| ExtractorError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            batch_prefix: BATCH_PREFIX.to_string(),
            max_text_length: 50_000,
            extraction_timeout_secs: None,
        }
    }
}
