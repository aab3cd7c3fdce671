//! Mock generation model for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use grounded_core::{GenerationModel, GenerationRequest, GenerationResponse, Result};

/// A [`GenerationModel`] that returns a canned reply and records every
/// prompt it receives.
///
/// # Example
///
/// ```rust,ignore
/// use grounded_model::MockChatModel;
///
/// let model = MockChatModel::new("Paris is the capital.");
/// let response = model.generate(GenerationRequest::new("...", 0.2)).await?;
/// assert_eq!(response.text, "Paris is the capital.");
/// assert_eq!(model.prompts().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockChatModel {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl MockChatModel {
    /// Create a mock that answers every request with `reply`.
    pub fn new(reply: impl Into<String>) -> Self {
        Self { reply: reply.into(), prompts: Mutex::new(Vec::new()) }
    }

    /// The prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("mock prompt lock poisoned").clone()
    }
}

#[async_trait]
impl GenerationModel for MockChatModel {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse> {
        self.prompts.lock().expect("mock prompt lock poisoned").push(request.prompt);
        Ok(GenerationResponse { text: self.reply.clone() })
    }
}
