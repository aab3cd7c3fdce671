//! Semantic search: query embedding + index lookup + result shaping.

use std::sync::Arc;

use tracing::info;

use crate::document::SimilarityResult;
use crate::embedding::EmbeddingProvider;
use crate::error::Result;
use crate::vectorstore::VectorStore;

/// Number of characters of chunk text included in a result snippet.
const SNIPPET_LEN: usize = 150;

/// Retrieves the chunks most similar to a query.
///
/// The query is embedded in query mode (distinct from the document mode used
/// at ingestion), matched against the index by cosine distance, and each
/// distance `d` is converted to a similarity score `clamp(1 - d, 0, 1)`.
pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
}

impl Retriever {
    /// Create a new retriever from its collaborators.
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, store: Arc<dyn VectorStore>) -> Self {
        Self { embedder, store }
    }

    /// Return the `top_k` most similar chunks, best first.
    ///
    /// An empty index yields an empty `Vec`; only embedding or index
    /// failures are errors, and they propagate unchanged.
    pub async fn search(&self, query: &str, top_k: usize) -> Result<Vec<SimilarityResult>> {
        let query_vector = self.embedder.embed_query(query).await?;
        let matches = self.store.query(&query_vector, top_k).await?;

        let results: Vec<SimilarityResult> = matches
            .into_iter()
            .map(|m| SimilarityResult {
                document_id: m.chunk.document_id,
                title: m.chunk.title,
                content_snippet: snippet(&m.chunk.text),
                similarity_score: (1.0 - m.distance).clamp(0.0, 1.0),
            })
            .collect();

        info!(result_count = results.len(), "semantic search completed");
        Ok(results)
    }
}

/// The first [`SNIPPET_LEN`] characters of the chunk followed by a
/// truncation marker.
fn snippet(text: &str) -> String {
    let mut out: String = text.chars().take(SNIPPET_LEN).collect();
    out.push_str("...");
    out
}
