//! Data types for documents, chunks, and retrieval results.

use serde::{Deserialize, Serialize};

/// A source document with a title and raw text content.
///
/// Documents are immutable once created; identity is the `id`, generated by
/// the document store at creation time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Unique identifier for the document.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// The full text content.
    pub content: String,
}

/// A segment of a [`Document`] with its vector embedding.
///
/// Chunk IDs are derived as `{document_id}_{ordinal}` and are unique across
/// the index. Chunks exist only inside the ingestion path and the vector
/// index; they are never exposed to callers directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Unique identifier for the chunk.
    pub id: String,
    /// The text content of the chunk.
    pub text: String,
    /// The vector embedding for this chunk's text.
    pub embedding: Vec<f32>,
    /// The ID of the parent [`Document`].
    pub document_id: String,
    /// The title of the parent [`Document`].
    pub title: String,
}

/// A [`Chunk`] returned from a vector index query, paired with its cosine
/// distance from the query vector (0 means identical direction).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchMatch {
    /// The matched chunk.
    pub chunk: Chunk,
    /// Cosine distance between the query vector and the chunk embedding.
    pub distance: f32,
}

/// A shaped retrieval result as returned to callers of semantic search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimilarityResult {
    /// The ID of the document the matched chunk belongs to.
    pub document_id: String,
    /// The title of that document.
    pub title: String,
    /// The first characters of the matched chunk, with a truncation marker.
    pub content_snippet: String,
    /// Normalized similarity score in `[0.0, 1.0]` (1 means identical direction).
    pub similarity_score: f32,
}

/// The outcome of answering one question.
///
/// `grounded: false` is a normal outcome, not an error: either no context
/// cleared the similarity gate (`context_used` is `None`) or the model
/// declined to answer from the context it was given (`context_used` is set).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroundedAnswer {
    /// The answer text, or the fixed refusal string.
    pub answer: String,
    /// Whether the answer is grounded in retrieved context.
    pub grounded: bool,
    /// The context fragment the model was given, if any.
    pub context_used: Option<String>,
    /// The similarity score of the retrieved context, if any.
    pub similarity_score: Option<f32>,
}
