//! # grounded-rag
//!
//! The retrieval-and-grounding pipeline for the Grounded QA service:
//! chunking, embeddings, vector indexing, semantic search, and grounded
//! answering.
//!
//! ## Overview
//!
//! - [`RecursiveChunker`] — overlapping bounded-length text splits
//! - [`VectorStore`] — cosine-distance index with [`SledVectorStore`]
//!   (durable) and [`InMemoryVectorStore`] (tests/dev) backends
//! - [`EmbeddingProvider`] — asymmetric document/query embeddings, with a
//!   Cohere implementation
//! - [`IngestionPipeline`] — chunk → embed → index
//! - [`Retriever`] — embed query → index lookup → scored results
//! - [`GroundedAnswerer`] — similarity gate → grounding prompt → generation
//!   → validation

pub mod answer;
pub mod chunking;
pub mod cohere;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod inmemory;
pub mod pipeline;
pub mod retriever;
pub mod sled_store;
pub mod vectorstore;

pub use answer::{GroundedAnswerer, REFUSAL};
pub use chunking::{Chunker, RecursiveChunker};
pub use cohere::CohereEmbeddingProvider;
pub use config::RagConfig;
pub use document::{Chunk, Document, GroundedAnswer, SearchMatch, SimilarityResult};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use inmemory::InMemoryVectorStore;
pub use pipeline::IngestionPipeline;
pub use retriever::Retriever;
pub use sled_store::SledVectorStore;
pub use vectorstore::VectorStore;
