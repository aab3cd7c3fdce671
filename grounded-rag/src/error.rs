//! Error types for the `grounded-rag` crate.

use thiserror::Error;

/// Errors that can occur in the retrieval-and-grounding pipeline.
///
/// Chunking and score computation are total over well-formed input and never
/// appear here; only I/O-bound steps (embed, index, generate) can fail.
#[derive(Debug, Error)]
pub enum RagError {
    /// An error occurred during embedding generation.
    #[error("embedding error ({provider}): {message}")]
    Embedding {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// A write to the vector index failed.
    #[error("index write error ({backend}): {message}")]
    IndexWrite {
        /// The vector index backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// A query against the vector index failed.
    #[error("index query error ({backend}): {message}")]
    IndexQuery {
        /// The vector index backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// A generation model call failed.
    #[error("generation error ({model}): {message}")]
    Generation {
        /// The model that produced the error.
        model: String,
        /// A description of the failure.
        message: String,
    },

    /// A configuration validation error.
    #[error("configuration error: {0}")]
    Config(String),

    /// An error propagated from `grounded-core`.
    #[error(transparent)]
    Core(#[from] grounded_core::CoreError),
}

/// A convenience result type for pipeline operations.
pub type Result<T> = std::result::Result<T, RagError>;
