//! Interaction Validation Errors
//!
//! Request-level failures on the webhook endpoint. These map to HTTP
//! status codes and never cause side effects: an invalid request writes
//! nothing and calls nothing upstream.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors raised while validating an inbound interaction request.
#[derive(Error, Debug)]
pub enum InteractionError {
    /// Signature or timestamp header absent; verification is not attempted.
    #[error("Missing signature headers")]
    MissingSignatureHeaders,
    /// Signature did not verify against the configured public key.
    #[error("Invalid request signature")]
    InvalidSignature,
    /// Body was not a structurally valid interaction payload.
    #[error("Malformed interaction payload: {0}")]
    MalformedPayload(String),
    /// Interaction type this handler does not serve (e.g. component press).
    #[error("Unsupported interaction type")]
    UnsupportedInteractionType,
    /// Command subtype other than chat-input.
    #[error("Unsupported command type")]
    UnsupportedCommandType,
    /// Neither a top-level user nor a member user was present.
    #[error("Interaction has no invoking user")]
    MissingInvoker,
}

impl From<InteractionError> for (StatusCode, String) {
    fn from(err: InteractionError) -> Self {
        match err {
            InteractionError::InvalidSignature => (StatusCode::UNAUTHORIZED, err.to_string()),
            InteractionError::MissingSignatureHeaders
            | InteractionError::MalformedPayload(_)
            | InteractionError::UnsupportedInteractionType
            | InteractionError::UnsupportedCommandType
            | InteractionError::MissingInvoker => (StatusCode::BAD_REQUEST, err.to_string()),
        }
    }
}
