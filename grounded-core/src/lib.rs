//! # grounded-core
//!
//! Shared types for the Grounded QA service: the error taxonomy and the
//! generation-model boundary. Provider implementations live in
//! `grounded-model`; the retrieval pipeline lives in `grounded-rag`.

pub mod error;
pub mod model;

pub use error::{CoreError, Result};
pub use model::{GenerationModel, GenerationRequest, GenerationResponse};
