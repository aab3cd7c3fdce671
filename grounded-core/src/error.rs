//! Error types shared across the Grounded QA service.

use thiserror::Error;

/// Errors surfaced by service-level operations.
///
/// The service distinguishes caller mistakes (`Validation`, `NotFound`) from
/// collaborator failures (`Model`, `Storage`). Collaborator failures are never
/// retried; the internal cause is logged and an opaque message reaches the
/// caller.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Caller input failed a precondition (empty title, content, query, or question).
    #[error("validation error: {0}")]
    Validation(String),

    /// A referenced document does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A generation model call failed (network, quota, malformed response).
    #[error("model error: {0}")]
    Model(String),

    /// Document storage is unavailable or rejected an operation.
    #[error("storage error: {0}")]
    Storage(String),
}

/// A convenience result type for service operations.
pub type Result<T> = std::result::Result<T, CoreError>;
