//! Document ingestion: chunk → embed → index.

use std::sync::Arc;

use tracing::{error, info};

use crate::chunking::Chunker;
use crate::document::Document;
use crate::embedding::EmbeddingProvider;
use crate::error::Result;
use crate::vectorstore::VectorStore;

/// The ingestion pipeline.
///
/// Splits a document into chunks, embeds them in document mode, and upserts
/// the chunk/vector pairs into the vector index. Ingestion is atomic from the
/// caller's perspective: a failure in embedding or indexing fails the whole
/// operation, and nothing is partially recovered.
pub struct IngestionPipeline {
    chunker: Arc<dyn Chunker>,
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
}

impl IngestionPipeline {
    /// Create a new ingestion pipeline from its collaborators.
    pub fn new(
        chunker: Arc<dyn Chunker>,
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
    ) -> Self {
        Self { chunker, embedder, store }
    }

    /// Ingest a single document and return the number of chunks stored.
    ///
    /// # Errors
    ///
    /// Propagates embedding and index failures unchanged; chunking itself
    /// never fails.
    pub async fn ingest(&self, document: &Document) -> Result<usize> {
        let chunks = self.chunker.chunk(&document.content);
        if chunks.is_empty() {
            info!(document.id = %document.id, chunk_count = 0, "ingested document (empty)");
            return Ok(0);
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.as_str()).collect();
        let embeddings = self.embedder.embed_documents(&texts).await.inspect_err(|e| {
            error!(document.id = %document.id, error = %e, "embedding failed during ingestion");
        })?;

        self.store
            .upsert(&document.id, &document.title, &chunks, &embeddings)
            .await
            .inspect_err(|e| {
                error!(document.id = %document.id, error = %e, "index upsert failed during ingestion");
            })?;

        let chunk_count = chunks.len();
        info!(document.id = %document.id, chunk_count, "ingested document");
        Ok(chunk_count)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::chunking::RecursiveChunker;
    use crate::error::RagError;
    use crate::inmemory::InMemoryVectorStore;

    /// Deterministic hash-based embeddings, normalised so cosine similarity
    /// is just the dot product.
    struct HashEmbedder {
        dimensions: usize,
    }

    impl HashEmbedder {
        fn vector(&self, text: &str) -> Vec<f32> {
            let hash =
                text.bytes().fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
            let mut emb = vec![0.0f32; self.dimensions];
            for (i, v) in emb.iter_mut().enumerate() {
                *v = ((hash.wrapping_add(i as u64)) as f32).sin();
            }
            let norm: f32 = emb.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm > 0.0 {
                emb.iter_mut().for_each(|x| *x /= norm);
            }
            emb
        }
    }

    #[async_trait]
    impl EmbeddingProvider for HashEmbedder {
        async fn embed_documents(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|t| self.vector(t)).collect())
        }

        async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
            Ok(self.vector(text))
        }

        fn dimensions(&self) -> usize {
            self.dimensions
        }
    }

    /// An embedder that always fails, for exercising the propagation path.
    struct FailingEmbedder;

    #[async_trait]
    impl EmbeddingProvider for FailingEmbedder {
        async fn embed_documents(&self, _texts: &[&str]) -> Result<Vec<Vec<f32>>> {
            Err(RagError::Embedding { provider: "test".into(), message: "quota exceeded".into() })
        }

        async fn embed_query(&self, _text: &str) -> Result<Vec<f32>> {
            Err(RagError::Embedding { provider: "test".into(), message: "quota exceeded".into() })
        }

        fn dimensions(&self) -> usize {
            8
        }
    }

    fn document(content: &str) -> Document {
        Document { id: "doc-1".into(), title: "Title".into(), content: content.into() }
    }

    #[tokio::test]
    async fn ingest_stores_one_entry_per_chunk() {
        let store = Arc::new(InMemoryVectorStore::new());
        let pipeline = IngestionPipeline::new(
            Arc::new(RecursiveChunker::new(500, 50)),
            Arc::new(HashEmbedder { dimensions: 16 }),
            store.clone(),
        );

        let text = "a".repeat(1200);
        let stored = pipeline.ingest(&document(&text)).await.unwrap();
        assert_eq!(stored, 3);
        assert_eq!(store.len().await, 3);
    }

    #[tokio::test]
    async fn ingest_of_empty_document_stores_nothing() {
        let store = Arc::new(InMemoryVectorStore::new());
        let pipeline = IngestionPipeline::new(
            Arc::new(RecursiveChunker::new(500, 50)),
            Arc::new(HashEmbedder { dimensions: 16 }),
            store.clone(),
        );

        let stored = pipeline.ingest(&document("")).await.unwrap();
        assert_eq!(stored, 0);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn embedding_failure_propagates_and_stores_nothing() {
        let store = Arc::new(InMemoryVectorStore::new());
        let pipeline = IngestionPipeline::new(
            Arc::new(RecursiveChunker::new(500, 50)),
            Arc::new(FailingEmbedder),
            store.clone(),
        );

        let result = pipeline.ingest(&document("some content")).await;
        assert!(matches!(result, Err(RagError::Embedding { .. })));
        assert!(store.is_empty().await);
    }
}
