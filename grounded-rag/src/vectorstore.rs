//! Vector index trait for storing chunk embeddings and answering
//! nearest-neighbor queries.

use async_trait::async_trait;

use crate::document::SearchMatch;
use crate::error::Result;

/// A storage backend for chunk embeddings with cosine-distance search.
///
/// Each chunk/vector pair at position `i` of an upsert is stored under the
/// chunk ID `"{document_id}_{i}"` with the owning document's id and title.
/// Re-ingesting a document id replaces all of its prior chunks, so a shorter
/// re-ingest never leaves orphaned stale entries behind.
///
/// # Example
///
/// ```rust,ignore
/// use grounded_rag::{InMemoryVectorStore, VectorStore};
///
/// let store = InMemoryVectorStore::new();
/// store.upsert("doc-1", "Title", &chunks, &vectors).await?;
/// let matches = store.query(&query_vector, 3).await?;
/// ```
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Store one embedding per chunk for the given document, replacing any
    /// chunks previously stored under the same document id.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::IndexWrite`](crate::RagError::IndexWrite) if
    /// `chunks` and `embeddings` differ in length or the backend fails.
    async fn upsert(
        &self,
        document_id: &str,
        title: &str,
        chunks: &[String],
        embeddings: &[Vec<f32>],
    ) -> Result<()>;

    /// Return up to `top_k` matches ordered by ascending cosine distance
    /// (most similar first).
    ///
    /// An empty index yields an empty `Vec`, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::IndexQuery`](crate::RagError::IndexQuery) if the
    /// backend fails.
    async fn query(&self, embedding: &[f32], top_k: usize) -> Result<Vec<SearchMatch>>;
}

/// Compute the cosine distance (`1 - cosine similarity`) between two vectors.
///
/// Both vectors are L2-normalized before computing the dot product. A vector
/// with zero magnitude is treated as maximally distant.
pub(crate) fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    1.0 - dot / (norm_a * norm_b)
}

/// The chunk id for ordinal `i` of a document.
pub(crate) fn chunk_id(document_id: &str, ordinal: usize) -> String {
    format!("{document_id}_{ordinal}")
}
