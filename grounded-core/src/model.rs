//! Generation model trait with typed request and response structures.
//!
//! The service never inspects provider-specific response shapes outside the
//! implementing crate; everything crossing this boundary is a
//! [`GenerationRequest`] or [`GenerationResponse`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single-turn text completion request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationRequest {
    /// The full prompt, including any instructions and context.
    pub prompt: String,
    /// Sampling temperature. Lower values favor precision over creativity.
    pub temperature: f32,
}

impl GenerationRequest {
    /// Create a new request from a prompt and a sampling temperature.
    pub fn new(prompt: impl Into<String>, temperature: f32) -> Self {
        Self { prompt: prompt.into(), temperature }
    }
}

/// The text produced by a generation model for one request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationResponse {
    /// The model's output, trimmed of surrounding whitespace by the provider.
    pub text: String,
}

/// A single-turn text generation model.
///
/// Implementations wrap a specific provider behind a unified async interface.
/// Calls are not retried; a failure surfaces immediately as
/// [`CoreError::Model`](crate::CoreError::Model).
#[async_trait]
pub trait GenerationModel: Send + Sync {
    /// A short name identifying the model, used in logs and error messages.
    fn name(&self) -> &str;

    /// Generate a completion for the given request.
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse>;
}
