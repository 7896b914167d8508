//! Groq Provider Implementation
//!
//! Talks to an OpenAI-compatible chat-completions endpoint. Every request uses
//! zero temperature and JSON-object response format, so the model can only
//! answer with a single syntactically valid JSON object.
//!
//! # Examples
//!
//! ```no_run
//! use ycnx_llm::GroqProvider;
//!
//! let api_key = std::env::var("GROQ_API_KEY").unwrap_or_default();
//! let provider = GroqProvider::default_endpoint("llama-3.1-8b-instant", api_key).unwrap();
//! ```

use crate::LlmError;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ycnx_domain::traits::LlmProvider;

/// Default Groq API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1";

/// Default model: fast, with a generous free quota
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// Chat-completions provider for Groq and other OpenAI-compatible APIs
pub struct GroqProvider {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

/// Request body for the chat-completions API
#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

/// Response from the chat-completions API
#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl GroqProvider {
    /// Create a new provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: API base URL (e.g., "https://api.groq.com/openai/v1")
    /// - `model`: Model to use (e.g., "llama-3.1-8b-instant")
    /// - `api_key`: Bearer token; an empty key is sent as-is and rejected by the service
    ///
    /// No client-side timeout is set; the service bounds the call.
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| LlmError::Communication(format!("Failed to build HTTP client: {}", e)))?;

        let endpoint: String = endpoint.into();
        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
            client,
        })
    }

    /// Create a provider against the default Groq endpoint
    pub fn default_endpoint(
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, LlmError> {
        Self::new(DEFAULT_ENDPOINT, model, api_key)
    }

    /// Model this provider asks for
    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body<'a>(&'a self, system: &'a str, prompt: &'a str) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: prompt },
            ],
            temperature: 0.0,
            response_format: ResponseFormat { kind: "json_object" },
        }
    }

    /// Send one chat-completions request and return the message content
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The request cannot be sent
    /// - The API key is rejected
    /// - The model is not available
    /// - The response carries no message content
    pub async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.endpoint);
        debug!("POST {} (model {}, prompt {} chars)", url, self.model, prompt.len());

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(system, prompt))
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(match status {
                reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                    LlmError::Unauthorized(error_text)
                }
                reqwest::StatusCode::NOT_FOUND => LlmError::ModelNotAvailable(self.model.clone()),
                reqwest::StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded,
                _ => LlmError::Communication(format!("HTTP {}: {}", status, error_text)),
            });
        }

        let body = response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        content_of(body)
    }
}

fn content_of(body: ChatCompletionResponse) -> Result<String, LlmError> {
    body.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| LlmError::InvalidResponse("Response has no message content".to_string()))
}

impl LlmProvider for GroqProvider {
    type Error = LlmError;

    async fn generate_json(&self, system: &str, prompt: &str) -> Result<String, Self::Error> {
        self.complete(system, prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groq_provider_creation() {
        let provider = GroqProvider::new("https://api.groq.com/openai/v1/", "llama", "key").unwrap();
        assert_eq!(provider.endpoint, "https://api.groq.com/openai/v1");
        assert_eq!(provider.model(), "llama");
        assert_eq!(provider.api_key, "key");
    }

    #[test]
    fn test_groq_provider_default_endpoint() {
        let provider = GroqProvider::default_endpoint(DEFAULT_MODEL, "").unwrap();
        assert_eq!(provider.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(provider.model(), DEFAULT_MODEL);
    }

    #[test]
    fn test_request_body_is_deterministic_json_mode() {
        let provider = GroqProvider::default_endpoint(DEFAULT_MODEL, "").unwrap();
        let body = serde_json::to_value(provider.request_body("sys", "user text")).unwrap();

        assert_eq!(body["model"], DEFAULT_MODEL);
        assert_eq!(body["temperature"], 0.0);
        assert_eq!(body["response_format"]["type"], "json_object");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "sys");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "user text");
    }

    #[test]
    fn test_content_of_response() {
        let body: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "{\"a\": 1}"}}]}"#,
        )
        .unwrap();
        assert_eq!(content_of(body).unwrap(), r#"{"a": 1}"#);

        let empty: ChatCompletionResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(content_of(empty), Err(LlmError::InvalidResponse(_))));

        let null_content: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap();
        assert!(matches!(content_of(null_content), Err(LlmError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_groq_error_handling() {
        // Invalid port: the request cannot even be built
        let provider = GroqProvider::new("http://localhost:99999", "llama", "").unwrap();

        let result = provider.generate_json("sys", "test").await;
        match result {
            Err(LlmError::Communication(_)) => {}
            _ => panic!("Expected Communication error"),
        }
    }

    #[tokio::test]
    #[ignore] // Only run with a real GROQ_API_KEY
    async fn test_groq_generate_integration() {
        let api_key = std::env::var("GROQ_API_KEY").unwrap_or_default();
        let provider = GroqProvider::default_endpoint(DEFAULT_MODEL, api_key).unwrap();
        let result = provider
            .generate_json("Output only JSON.", "Return {\"ok\": true}")
            .await;

        if let Ok(response) = result {
            let value: serde_json::Value = serde_json::from_str(&response).unwrap();
            assert!(value.is_object());
        }
    }
}
