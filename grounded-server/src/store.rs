//! Document repository.
//!
//! Raw documents are owned by a [`DocumentStore`]; the retrieval core only
//! ever sees them through this interface. The JSON-file implementation
//! persists the full document map on every save, which is adequate for the
//! corpus sizes this service targets.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use grounded_core::{CoreError, Result};
use grounded_rag::Document;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

/// A repository of raw uploaded documents.
///
/// Documents are immutable once created; there is no update or delete.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store a new document and return it with its generated id.
    async fn save(&self, title: &str, content: &str) -> Result<Document>;

    /// Look up a document by id.
    async fn get(&self, id: &str) -> Result<Option<Document>>;
}

/// A [`DocumentStore`] persisted as a single JSON file.
pub struct JsonDocumentStore {
    path: PathBuf,
    documents: RwLock<HashMap<String, Document>>,
}

impl JsonDocumentStore {
    /// Open the store at `path`, loading any previously saved documents.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let documents = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| CoreError::Storage(format!("failed to parse {}: {e}", path.display())))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                return Err(CoreError::Storage(format!(
                    "failed to read {}: {e}",
                    path.display()
                )));
            }
        };

        info!(path = %path.display(), count = documents.len(), "opened document store");
        Ok(Self { path, documents: RwLock::new(documents) })
    }

    async fn persist(&self, documents: &HashMap<String, Document>) -> Result<()> {
        let bytes = serde_json::to_vec(documents)
            .map_err(|e| CoreError::Storage(format!("failed to encode documents: {e}")))?;
        tokio::fs::write(&self.path, bytes).await.map_err(|e| {
            CoreError::Storage(format!("failed to write {}: {e}", self.path.display()))
        })
    }
}

#[async_trait]
impl DocumentStore for JsonDocumentStore {
    async fn save(&self, title: &str, content: &str) -> Result<Document> {
        let document = Document {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            content: content.to_string(),
        };

        let mut documents = self.documents.write().await;
        documents.insert(document.id.clone(), document.clone());
        self.persist(&documents).await?;

        Ok(document)
    }

    async fn get(&self, id: &str) -> Result<Option<Document>> {
        Ok(self.documents.read().await.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn saved_documents_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonDocumentStore::open(dir.path().join("documents.json")).await.unwrap();

        let saved = store.save("Title", "Some content").await.unwrap();
        let loaded = store.get(&saved.id).await.unwrap().unwrap();

        assert_eq!(loaded, saved);
        assert_eq!(loaded.title, "Title");
    }

    #[tokio::test]
    async fn unknown_id_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonDocumentStore::open(dir.path().join("documents.json")).await.unwrap();
        assert!(store.get("no-such-id").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn documents_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("documents.json");

        let saved = {
            let store = JsonDocumentStore::open(path.clone()).await.unwrap();
            store.save("Persistent", "content").await.unwrap()
        };

        let reopened = JsonDocumentStore::open(path).await.unwrap();
        let loaded = reopened.get(&saved.id).await.unwrap().unwrap();
        assert_eq!(loaded, saved);
    }

    #[tokio::test]
    async fn ids_are_unique_per_save() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonDocumentStore::open(dir.path().join("documents.json")).await.unwrap();

        let a = store.save("T", "c").await.unwrap();
        let b = store.save("T", "c").await.unwrap();
        assert_ne!(a.id, b.id);
    }
}
