//! In-memory vector index.
//!
//! [`InMemoryVectorStore`] keeps chunks in a `HashMap` behind a
//! `tokio::sync::RwLock`. It does not survive restarts and is intended for
//! tests and development; the durable backend is
//! [`SledVectorStore`](crate::SledVectorStore).

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::document::{Chunk, SearchMatch};
use crate::error::{RagError, Result};
use crate::vectorstore::{VectorStore, chunk_id, cosine_distance};

/// An in-memory vector index using cosine distance for search.
#[derive(Debug, Default)]
pub struct InMemoryVectorStore {
    chunks: RwLock<HashMap<String, Chunk>>,
}

impl InMemoryVectorStore {
    /// Create a new empty in-memory vector index.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of chunks currently stored.
    pub async fn len(&self) -> usize {
        self.chunks.read().await.len()
    }

    /// Whether the index holds no chunks.
    pub async fn is_empty(&self) -> bool {
        self.chunks.read().await.is_empty()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn upsert(
        &self,
        document_id: &str,
        title: &str,
        chunks: &[String],
        embeddings: &[Vec<f32>],
    ) -> Result<()> {
        if chunks.len() != embeddings.len() {
            return Err(RagError::IndexWrite {
                backend: "in-memory".to_string(),
                message: format!(
                    "chunk/embedding length mismatch: {} chunks, {} embeddings",
                    chunks.len(),
                    embeddings.len()
                ),
            });
        }

        let mut stored = self.chunks.write().await;
        stored.retain(|_, chunk| chunk.document_id != document_id);
        for (i, (text, embedding)) in chunks.iter().zip(embeddings).enumerate() {
            let id = chunk_id(document_id, i);
            stored.insert(
                id.clone(),
                Chunk {
                    id,
                    text: text.clone(),
                    embedding: embedding.clone(),
                    document_id: document_id.to_string(),
                    title: title.to_string(),
                },
            );
        }
        Ok(())
    }

    async fn query(&self, embedding: &[f32], top_k: usize) -> Result<Vec<SearchMatch>> {
        let stored = self.chunks.read().await;

        let mut matches: Vec<SearchMatch> = stored
            .values()
            .map(|chunk| SearchMatch {
                distance: cosine_distance(&chunk.embedding, embedding),
                chunk: chunk.clone(),
            })
            .collect();

        matches.sort_by(|a, b| {
            a.distance.partial_cmp(&b.distance).unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(top_k);
        Ok(matches)
    }
}
