//! Cohere embedding provider using the v2 embed API.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};

/// The Cohere v2 embeddings endpoint.
const COHERE_EMBED_URL: &str = "https://api.cohere.com/v2/embed";

/// The default embedding model.
const DEFAULT_MODEL: &str = "embed-multilingual-v3.0";

/// The dimensionality of `embed-multilingual-v3.0`.
const DEFAULT_DIMENSIONS: usize = 1024;

/// Upstream calls are bounded so a hung provider surfaces as a failure
/// instead of stalling the request indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// An [`EmbeddingProvider`] backed by the Cohere embed API.
///
/// Stored document chunks are embedded with `input_type: search_document`
/// and queries with `input_type: search_query`; Cohere projects the two
/// differently, which is what makes the retrieval asymmetric.
///
/// # Example
///
/// ```rust,ignore
/// use grounded_rag::CohereEmbeddingProvider;
///
/// let provider = CohereEmbeddingProvider::new("co-...")?;
/// let vector = provider.embed_query("what is rust?").await?;
/// ```
pub struct CohereEmbeddingProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    dimensions: usize,
}

impl CohereEmbeddingProvider {
    /// Create a new provider with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(RagError::Embedding {
                provider: "Cohere".into(),
                message: "API key must not be empty".into(),
            });
        }

        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build().map_err(|e| {
            RagError::Embedding {
                provider: "Cohere".into(),
                message: format!("failed to build HTTP client: {e}"),
            }
        })?;

        Ok(Self {
            client,
            api_key,
            model: DEFAULT_MODEL.into(),
            dimensions: DEFAULT_DIMENSIONS,
        })
    }

    /// Create a new provider using the `COHERE_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("COHERE_API_KEY").map_err(|_| RagError::Embedding {
            provider: "Cohere".into(),
            message: "COHERE_API_KEY environment variable not set".into(),
        })?;
        Self::new(api_key)
    }

    /// Set the embedding model and its dimensionality.
    pub fn with_model(mut self, model: impl Into<String>, dimensions: usize) -> Self {
        self.model = model.into();
        self.dimensions = dimensions;
        self
    }

    async fn embed(&self, texts: &[&str], input_type: &'static str) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(provider = "Cohere", batch_size = texts.len(), input_type, model = %self.model, "embedding batch");

        let request_body = EmbedRequest {
            model: &self.model,
            texts: texts.to_vec(),
            input_type,
            embedding_types: &["float"],
        };

        let response = self
            .client
            .post(COHERE_EMBED_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "Cohere", error = %e, "embed request failed");
                RagError::Embedding {
                    provider: "Cohere".into(),
                    message: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail =
                serde_json::from_str::<ErrorResponse>(&body).map(|e| e.message).unwrap_or(body);

            error!(provider = "Cohere", %status, "embed API error");
            return Err(RagError::Embedding {
                provider: "Cohere".into(),
                message: format!("API returned {status}: {detail}"),
            });
        }

        let embed_response: EmbedResponse = response.json().await.map_err(|e| {
            error!(provider = "Cohere", error = %e, "failed to parse embed response");
            RagError::Embedding {
                provider: "Cohere".into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        Ok(embed_response.embeddings.float)
    }
}

// ── Cohere API request/response types ──────────────────────────────

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    texts: Vec<&'a str>,
    input_type: &'static str,
    embedding_types: &'static [&'static str],
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: EmbeddingsByType,
}

#[derive(Deserialize)]
struct EmbeddingsByType {
    float: Vec<Vec<f32>>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: String,
}

// ── EmbeddingProvider implementation ───────────────────────────────

#[async_trait]
impl EmbeddingProvider for CohereEmbeddingProvider {
    async fn embed_documents(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        self.embed(texts, "search_document").await
    }

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        let results = self.embed(&[text], "search_query").await?;
        results.into_iter().next().ok_or_else(|| RagError::Embedding {
            provider: "Cohere".into(),
            message: "API returned no embedding for query".into(),
        })
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_api_key() {
        assert!(matches!(
            CohereEmbeddingProvider::new(""),
            Err(RagError::Embedding { .. })
        ));
    }

    #[test]
    fn embed_request_serializes_input_type() {
        let request = EmbedRequest {
            model: "embed-multilingual-v3.0",
            texts: vec!["hello"],
            input_type: "search_query",
            embedding_types: &["float"],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["input_type"], "search_query");
        assert_eq!(json["embedding_types"][0], "float");
    }

    #[test]
    fn embed_response_parses_float_embeddings() {
        let body = r#"{"id":"x","embeddings":{"float":[[0.1,0.2],[0.3,0.4]]}}"#;
        let response: EmbedResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.embeddings.float.len(), 2);
        assert_eq!(response.embeddings.float[0], vec![0.1, 0.2]);
    }
}
