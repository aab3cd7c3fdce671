//! # grounded-server
//!
//! The HTTP service for the Grounded QA system. Routes:
//!
//! - `POST /upload` — store a raw document
//! - `POST /generate-embeddings` — chunk, embed, and index a document
//! - `POST /search` — semantic search over indexed chunks
//! - `POST /ask` — grounded question answering
//! - `GET /health` — liveness probe

pub mod config;
pub mod error;
pub mod moderation;
pub mod schemas;
pub mod server;
pub mod store;

pub use config::ServerConfig;
pub use server::{AppState, app_router, run_server};
