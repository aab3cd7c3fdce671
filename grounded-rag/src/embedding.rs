//! Embedding provider trait with asymmetric document/query modes.

use async_trait::async_trait;

use crate::error::Result;

/// A provider that maps text to fixed-dimension embedding vectors.
///
/// Document and query embeddings are distinct modes: a provider may use
/// different underlying projections for the same text depending on whether it
/// will be stored or searched with. Implementations must route stored chunks
/// through [`embed_documents`](EmbeddingProvider::embed_documents) and search
/// input through [`embed_query`](EmbeddingProvider::embed_query).
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate one embedding per chunk of document text.
    async fn embed_documents(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;

    /// Generate an embedding for a search query or question.
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>>;

    /// The dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;
}
