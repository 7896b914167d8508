//! YCNX LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `ycnx-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `GroqProvider`: OpenAI-compatible chat-completions client (Groq by default)
//!
//! # Examples
//!
//! ```
//! use ycnx_llm::MockProvider;
//! use ycnx_domain::traits::LlmProvider;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let provider = MockProvider::new(r#"{"total_applied": "500"}"#);
//! let result = provider.generate_json("system", "prompt").await.unwrap();
//! assert_eq!(result, r#"{"total_applied": "500"}"#);
//! # }
//! ```

#![warn(missing_docs)]

pub mod groq;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use ycnx_domain::traits::LlmProvider;

pub use groq::GroqProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// API key missing or rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

const ERROR_MARKER: &str = "ERROR";

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls. A
/// response registered with [`MockProvider::add_response`] is returned for any
/// prompt containing its key; otherwise the default response is used.
///
/// # Examples
///
/// ```
/// use ycnx_llm::MockProvider;
/// use ycnx_domain::traits::LlmProvider;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut provider = MockProvider::default();
/// provider.add_response("period one", "{\"batch_no\": \"A\"}");
/// provider.add_response("period two", "{\"batch_no\": \"B\"}");
/// assert_eq!(provider.generate_json("", "text of period one").await.unwrap(), "{\"batch_no\": \"A\"}");
/// assert_eq!(provider.generate_json("", "text of period two").await.unwrap(), "{\"batch_no\": \"B\"}");
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, String>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a response for prompts containing `key`
    pub fn add_response(&mut self, key: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(key.into(), response.into());
    }

    /// Fail every prompt containing `key`
    pub fn add_error(&mut self, key: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(key.into(), ERROR_MARKER.to_string());
    }

    /// Get the number of times the provider was called
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Prompts received so far, oldest first
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn respond(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        let responses = self.responses.lock().unwrap();
        let matched = responses
            .iter()
            .filter(|(key, _)| prompt.contains(key.as_str()))
            .max_by_key(|(key, _)| key.len());

        match matched {
            Some((_, response)) if response == ERROR_MARKER => {
                Err(LlmError::Other("Mock error".to_string()))
            }
            Some((_, response)) => Ok(response.clone()),
            None => Ok(self.default_response.clone()),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("{}")
    }
}

impl LlmProvider for MockProvider {
    type Error = LlmError;

    async fn generate_json(&self, _system: &str, prompt: &str) -> Result<String, Self::Error> {
        self.respond(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate_json("sys", "any prompt").await;
        assert_eq!(result.unwrap(), "Test response");
    }

    #[tokio::test]
    async fn test_mock_provider_keyed_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        assert_eq!(provider.generate_json("", "say hello").await.unwrap(), "world");
        assert_eq!(provider.generate_json("", "foo!").await.unwrap(), "bar");
        assert_eq!(provider.generate_json("", "unknown").await.unwrap(), "{}");
    }

    #[tokio::test]
    async fn test_mock_provider_longest_key_wins() {
        let mut provider = MockProvider::default();
        provider.add_response("period 1", "one");
        provider.add_response("period 12", "twelve");

        assert_eq!(provider.generate_json("", "text for period 12").await.unwrap(), "twelve");
        assert_eq!(provider.generate_json("", "text for period 1.").await.unwrap(), "one");
    }

    #[tokio::test]
    async fn test_mock_provider_records_prompts() {
        let provider = MockProvider::new("x");
        assert_eq!(provider.call_count(), 0);

        provider.generate_json("", "first").await.unwrap();
        provider.generate_json("", "second").await.unwrap();

        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.prompts(), vec!["first".to_string(), "second".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error("bad prompt");

        let result = provider.generate_json("", "a bad prompt").await;
        assert!(matches!(result, Err(LlmError::Other(_))));
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_state() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.generate_json("", "test").await.unwrap();

        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }
}
