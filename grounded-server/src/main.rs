//! Binary entry point: wire configuration, providers, and stores, then serve.

use std::sync::Arc;

use anyhow::Context;
use grounded_model::CohereChatModel;
use grounded_rag::{
    CohereEmbeddingProvider, GroundedAnswerer, IngestionPipeline, RagConfig, RecursiveChunker,
    Retriever, SledVectorStore,
};
use grounded_server::server::AppState;
use grounded_server::store::JsonDocumentStore;
use grounded_server::{ServerConfig, moderation::KeywordModeration, run_server};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let server_config = ServerConfig::from_env()?;
    tokio::fs::create_dir_all(&server_config.data_dir)
        .await
        .with_context(|| format!("failed to create {}", server_config.data_dir.display()))?;

    let rag_config = RagConfig::default();

    let embedder = Arc::new(CohereEmbeddingProvider::from_env()?);
    let model = Arc::new(CohereChatModel::from_env()?);
    let index = Arc::new(SledVectorStore::open(server_config.data_dir.join("index"))?);
    let documents =
        Arc::new(JsonDocumentStore::open(server_config.data_dir.join("documents.json")).await?);

    let chunker = Arc::new(RecursiveChunker::new(rag_config.chunk_size, rag_config.chunk_overlap));
    let ingestion = Arc::new(IngestionPipeline::new(chunker, embedder.clone(), index.clone()));
    let retriever = Arc::new(Retriever::new(embedder, index));
    let answerer = Arc::new(GroundedAnswerer::new(retriever.clone(), model, rag_config.clone()));

    let state = AppState {
        documents,
        ingestion,
        retriever,
        answerer,
        moderation: Arc::new(KeywordModeration::new()),
        config: rag_config,
    };

    run_server(&server_config, state).await
}
