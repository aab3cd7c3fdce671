//! Cohere chat client using the v2 messages API.

use std::time::Duration;

use async_trait::async_trait;
use grounded_core::{CoreError, GenerationModel, GenerationRequest, GenerationResponse, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// The Cohere v2 chat endpoint.
const COHERE_CHAT_URL: &str = "https://api.cohere.com/v2/chat";

/// The default chat model.
const DEFAULT_MODEL: &str = "command-r-plus-08-2024";

/// Upstream calls are bounded so a hung provider surfaces as a failure
/// instead of stalling the request indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A [`GenerationModel`] backed by the Cohere chat API.
///
/// Sends the prompt as a single user message and returns the first text
/// block of the reply, trimmed of surrounding whitespace.
///
/// # Example
///
/// ```rust,ignore
/// use grounded_model::CohereChatModel;
///
/// let model = CohereChatModel::from_env()?;
/// let response = model.generate(GenerationRequest::new("Say hi", 0.2)).await?;
/// ```
pub struct CohereChatModel {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl CohereChatModel {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(CoreError::Model("API key must not be empty".into()));
        }

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CoreError::Model(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, api_key, model: DEFAULT_MODEL.into() })
    }

    /// Create a new client using the `COHERE_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("COHERE_API_KEY")
            .map_err(|_| CoreError::Model("COHERE_API_KEY environment variable not set".into()))?;
        Self::new(api_key)
    }

    /// Set the chat model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

// ── Cohere API request/response types ──────────────────────────────

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: String,
}

// ── GenerationModel implementation ─────────────────────────────────

#[async_trait]
impl GenerationModel for CohereChatModel {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse> {
        debug!(model = %self.model, temperature = request.temperature, prompt_len = request.prompt.len(), "chat request");

        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage { role: "user", content: &request.prompt }],
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(COHERE_CHAT_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(model = %self.model, error = %e, "chat request failed");
                CoreError::Model(format!("request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail =
                serde_json::from_str::<ErrorResponse>(&body).map(|e| e.message).unwrap_or(body);

            error!(model = %self.model, %status, "chat API error");
            return Err(CoreError::Model(format!("API returned {status}: {detail}")));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            error!(model = %self.model, error = %e, "failed to parse chat response");
            CoreError::Model(format!("failed to parse response: {e}"))
        })?;

        let text = chat_response
            .message
            .content
            .into_iter()
            .find_map(|block| block.text)
            .unwrap_or_default()
            .trim()
            .to_string();

        Ok(GenerationResponse { text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_api_key() {
        assert!(CohereChatModel::new("").is_err());
    }

    #[test]
    fn chat_request_serializes_single_user_message() {
        let request = ChatRequest {
            model: "command-r-plus-08-2024",
            messages: vec![ChatMessage { role: "user", content: "hello" }],
            temperature: 0.2,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hello");
        let temperature = json["temperature"].as_f64().unwrap();
        assert!((temperature - 0.2).abs() < 1e-6);
    }

    #[test]
    fn chat_response_extracts_first_text_block() {
        let body = r#"{"message":{"role":"assistant","content":[{"type":"text","text":"  Paris.  "}]}}"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        let text = response.message.content.into_iter().find_map(|b| b.text).unwrap();
        assert_eq!(text.trim(), "Paris.");
    }
}
