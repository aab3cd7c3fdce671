//! # grounded-model
//!
//! Generation model implementations for the Grounded QA service.
//!
//! - [`CohereChatModel`] — Cohere v2 chat API
//! - [`MockChatModel`] — deterministic mock for tests

pub mod cohere;
pub mod mock;

pub use cohere::CohereChatModel;
pub use mock::MockChatModel;
