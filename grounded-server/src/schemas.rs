//! Request and response schemas for the HTTP API.

use grounded_rag::SimilarityResult;
use serde::{Deserialize, Serialize};

/// Body of `POST /upload`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRequest {
    /// Title of the document.
    pub title: String,
    /// Full text content of the document.
    pub content: String,
}

/// Response of `POST /upload`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    /// The id generated for the stored document.
    pub document_id: String,
}

/// Body of `POST /generate-embeddings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateEmbeddingsRequest {
    /// Id of a previously uploaded document.
    pub document_id: String,
}

/// Response of `POST /generate-embeddings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateEmbeddingsResponse {
    pub message: String,
}

/// Body of `POST /search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text search query.
    pub query: String,
}

/// Response of `POST /search`. `results` may be empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SimilarityResult>,
}

/// Body of `POST /ask`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    /// The user's question.
    pub question: String,
}

/// Response of `POST /ask`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    /// The question as asked.
    pub question: String,
    /// The generated answer, or a fixed refusal string.
    pub answer: String,
    /// Whether the answer is grounded in retrieved context.
    pub grounded: bool,
    /// The context fragment used, when one cleared the similarity gate.
    pub context_used: Option<String>,
    /// The similarity score of that fragment.
    pub similarity_score: Option<f32>,
}
