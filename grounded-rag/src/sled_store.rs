//! Durable vector index backed by [sled](https://docs.rs/sled).
//!
//! Chunks are bincode-encoded under their chunk id. Every upsert flushes the
//! tree before returning, so acknowledged writes survive a process crash.

use async_trait::async_trait;

use crate::document::{Chunk, SearchMatch};
use crate::error::{RagError, Result};
use crate::vectorstore::{VectorStore, chunk_id, cosine_distance};

/// A [`VectorStore`] persisted in an embedded sled database.
///
/// Similarity search scans the full tree and ranks by cosine distance, which
/// is adequate for the single-collection, small-corpus scale this service
/// targets.
#[derive(Debug)]
pub struct SledVectorStore {
    db: sled::Db,
}

impl SledVectorStore {
    /// Open (or create) the index at the given path.
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let db = sled::open(path).map_err(Self::write_err)?;
        Ok(Self { db })
    }

    fn write_err(e: sled::Error) -> RagError {
        RagError::IndexWrite { backend: "sled".to_string(), message: e.to_string() }
    }

    fn query_err(e: impl std::fmt::Display) -> RagError {
        RagError::IndexQuery { backend: "sled".to_string(), message: e.to_string() }
    }

    /// Remove every chunk stored under the given document id.
    fn remove_document(&self, document_id: &str) -> Result<()> {
        let prefix = format!("{document_id}_");
        let keys: Vec<_> = self
            .db
            .scan_prefix(prefix.as_bytes())
            .keys()
            .collect::<std::result::Result<_, _>>()
            .map_err(Self::write_err)?;
        for key in keys {
            self.db.remove(key).map_err(Self::write_err)?;
        }
        Ok(())
    }
}

#[async_trait]
impl VectorStore for SledVectorStore {
    async fn upsert(
        &self,
        document_id: &str,
        title: &str,
        chunks: &[String],
        embeddings: &[Vec<f32>],
    ) -> Result<()> {
        if chunks.len() != embeddings.len() {
            return Err(RagError::IndexWrite {
                backend: "sled".to_string(),
                message: format!(
                    "chunk/embedding length mismatch: {} chunks, {} embeddings",
                    chunks.len(),
                    embeddings.len()
                ),
            });
        }

        self.remove_document(document_id)?;

        for (i, (text, embedding)) in chunks.iter().zip(embeddings).enumerate() {
            let id = chunk_id(document_id, i);
            let chunk = Chunk {
                id: id.clone(),
                text: text.clone(),
                embedding: embedding.clone(),
                document_id: document_id.to_string(),
                title: title.to_string(),
            };
            let encoded = bincode::serialize(&chunk).map_err(|e| RagError::IndexWrite {
                backend: "sled".to_string(),
                message: format!("failed to encode chunk '{id}': {e}"),
            })?;
            self.db.insert(id.as_bytes(), encoded).map_err(Self::write_err)?;
        }

        // Writes must be durable before upsert returns.
        self.db.flush_async().await.map_err(Self::write_err)?;
        Ok(())
    }

    async fn query(&self, embedding: &[f32], top_k: usize) -> Result<Vec<SearchMatch>> {
        let mut matches = Vec::new();

        for item in self.db.iter() {
            let (_, value) = item.map_err(Self::query_err)?;
            let chunk: Chunk = bincode::deserialize(&value).map_err(Self::query_err)?;
            matches.push(SearchMatch {
                distance: cosine_distance(&chunk.embedding, embedding),
                chunk,
            });
        }

        matches.sort_by(|a, b| {
            a.distance.partial_cmp(&b.distance).unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(top_k);
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunks(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[tokio::test]
    async fn chunks_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();

        {
            let store = SledVectorStore::open(dir.path()).unwrap();
            store
                .upsert("doc-1", "Title", &chunks(&["alpha", "beta"]), &[
                    vec![1.0, 0.0],
                    vec![0.0, 1.0],
                ])
                .await
                .unwrap();
        }

        let store = SledVectorStore::open(dir.path()).unwrap();
        let matches = store.query(&[1.0, 0.0], 10).await.unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].chunk.text, "alpha");
        assert_eq!(matches[0].chunk.title, "Title");
    }

    #[tokio::test]
    async fn reingest_replaces_all_prior_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let store = SledVectorStore::open(dir.path()).unwrap();

        let vectors = vec![vec![1.0, 0.0]; 3];
        store.upsert("doc-1", "Title", &chunks(&["a", "b", "c"]), &vectors).await.unwrap();
        store.upsert("doc-1", "Title", &chunks(&["x"]), &[vec![0.0, 1.0]]).await.unwrap();

        let matches = store.query(&[0.0, 1.0], 10).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].chunk.id, "doc-1_0");
        assert_eq!(matches[0].chunk.text, "x");
    }

    #[tokio::test]
    async fn upsert_rejects_length_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let store = SledVectorStore::open(dir.path()).unwrap();

        let result = store.upsert("doc-1", "Title", &chunks(&["a", "b"]), &[vec![1.0]]).await;
        assert!(matches!(result, Err(RagError::IndexWrite { .. })));
    }

    #[tokio::test]
    async fn query_on_empty_index_returns_no_matches() {
        let dir = tempfile::tempdir().unwrap();
        let store = SledVectorStore::open(dir.path()).unwrap();
        assert!(store.query(&[1.0, 0.0], 5).await.unwrap().is_empty());
    }
}
