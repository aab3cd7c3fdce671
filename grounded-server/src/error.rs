//! API error mapping.
//!
//! Caller mistakes keep their message; collaborator failures are logged at
//! the call site and reach the caller as one opaque category.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use grounded_core::CoreError;
use grounded_rag::RagError;
use serde_json::json;

/// The opaque message returned for any upstream failure.
const UPSTREAM_MESSAGE: &str = "The upstream service could not process the request at this time";

/// An error ready to be rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// A 400 for input that fails a precondition.
    pub fn validation(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into() }
    }

    /// A 404 for a missing document.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self { status: StatusCode::NOT_FOUND, message: message.into() }
    }

    /// A 500 with the opaque upstream message. The internal cause must be
    /// logged by the caller; it is never exposed.
    pub fn upstream() -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, message: UPSTREAM_MESSAGE.into() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // 500s use {"error": ...}; everything else uses {"detail": ...}.
        let body = if self.status == StatusCode::INTERNAL_SERVER_ERROR {
            json!({ "error": self.message })
        } else {
            json!({ "detail": self.message })
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Validation(message) => Self::validation(message),
            CoreError::NotFound(message) => Self::not_found(message),
            CoreError::Model(_) | CoreError::Storage(_) => Self::upstream(),
        }
    }
}

impl From<RagError> for ApiError {
    fn from(e: RagError) -> Self {
        match e {
            RagError::Core(core) => core.into(),
            _ => Self::upstream(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let error: ApiError = CoreError::Validation("title must not be empty".into()).into();
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert_eq!(error.message, "title must not be empty");
    }

    #[test]
    fn not_found_keeps_its_message() {
        let error: ApiError = CoreError::NotFound("document not found".into()).into();
        assert_eq!(error.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn upstream_failures_are_opaque() {
        let error: ApiError = RagError::Embedding {
            provider: "Cohere".into(),
            message: "secret internal detail".into(),
        }
        .into();
        assert_eq!(error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.message, UPSTREAM_MESSAGE);
    }
}
