//! HTTP routing and handlers.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router, extract::State};
use grounded_rag::{GroundedAnswerer, IngestionPipeline, RagConfig, Retriever};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::moderation::{KeywordModeration, MODERATION_REFUSAL};
use crate::schemas::{
    AskRequest, AskResponse, GenerateEmbeddingsRequest, GenerateEmbeddingsResponse, SearchRequest,
    SearchResponse, UploadRequest, UploadResponse,
};
use crate::store::DocumentStore;

/// Shared handler state, constructed once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub documents: Arc<dyn DocumentStore>,
    pub ingestion: Arc<IngestionPipeline>,
    pub retriever: Arc<Retriever>,
    pub answerer: Arc<GroundedAnswerer>,
    pub moderation: Arc<KeywordModeration>,
    pub config: RagConfig,
}

/// Build the service router.
pub fn app_router(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/upload", post(upload_document))
        .route("/generate-embeddings", post(generate_embeddings))
        .route("/search", post(search_documents))
        .route("/ask", post(ask_question))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until shutdown.
pub async fn run_server(config: &ServerConfig, state: AppState) -> anyhow::Result<()> {
    let app = app_router(state);
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| "invalid host/port for grounded-server")?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("grounded-server listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok", "service": "grounded"}))
}

/// `POST /upload` — store a raw document and return its generated id.
async fn upload_document(
    State(state): State<AppState>,
    Json(request): Json<UploadRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if request.title.trim().is_empty() {
        return Err(ApiError::validation("title must not be empty"));
    }
    if request.content.trim().is_empty() {
        return Err(ApiError::validation("content must not be empty"));
    }

    let document = state.documents.save(&request.title, &request.content).await.map_err(|e| {
        error!(error = %e, "failed to save document");
        ApiError::upstream()
    })?;

    info!(document.id = %document.id, content_len = request.content.len(), "document uploaded");
    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message: "Document uploaded successfully".to_string(),
            document_id: document.id,
        }),
    ))
}

/// `POST /generate-embeddings` — chunk, embed, and index a stored document.
async fn generate_embeddings(
    State(state): State<AppState>,
    Json(request): Json<GenerateEmbeddingsRequest>,
) -> Result<Json<GenerateEmbeddingsResponse>, ApiError> {
    let document = state
        .documents
        .get(&request.document_id)
        .await
        .map_err(|e| {
            error!(error = %e, "document lookup failed");
            ApiError::upstream()
        })?
        .ok_or_else(|| ApiError::not_found("document not found"))?;

    let chunk_count = state.ingestion.ingest(&document).await.map_err(|e| {
        error!(document.id = %document.id, error = %e, "ingestion failed");
        ApiError::upstream()
    })?;

    info!(document.id = %document.id, chunk_count, "embeddings generated");
    Ok(Json(GenerateEmbeddingsResponse {
        message: "Embeddings generated successfully".to_string(),
    }))
}

/// `POST /search` — semantic search over the indexed corpus.
async fn search_documents(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    if request.query.trim().is_empty() {
        return Err(ApiError::validation("query must not be empty"));
    }

    info!(query_len = request.query.len(), "search started");
    let results =
        state.retriever.search(&request.query, state.config.top_k).await.map_err(|e| {
            error!(error = %e, "search failed");
            ApiError::upstream()
        })?;

    info!(result_count = results.len(), "search succeeded");
    Ok(Json(SearchResponse { results }))
}

/// `POST /ask` — grounded question answering.
async fn ask_question(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    if request.question.trim().is_empty() {
        warn!("ask rejected: empty question");
        return Err(ApiError::validation("question must not be empty"));
    }

    // Moderation runs before the answerer; a blocked question is a normal
    // response, not an error.
    if state.moderation.is_inappropriate(&request.question) {
        info!("ask blocked by moderation");
        return Ok(Json(AskResponse {
            question: request.question,
            answer: MODERATION_REFUSAL.to_string(),
            grounded: false,
            context_used: None,
            similarity_score: None,
        }));
    }

    info!(question_len = request.question.len(), "ask started");
    let answer = state.answerer.answer(&request.question).await.map_err(|e| {
        error!(error = %e, "ask failed");
        ApiError::upstream()
    })?;

    info!(grounded = answer.grounded, similarity = ?answer.similarity_score, "ask succeeded");
    Ok(Json(AskResponse {
        question: request.question,
        answer: answer.answer,
        grounded: answer.grounded,
        context_used: answer.context_used,
        similarity_score: answer.similarity_score,
    }))
}
