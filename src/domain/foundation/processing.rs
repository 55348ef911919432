//! Errors raised while an inbound message is being processed.

use thiserror::Error;

/// Failure reported by a message processor or channel adapter.
///
/// The HTTP layer renders these as-is; it never maps one kind to another.
#[derive(Debug, Clone, Error)]
pub enum ProcessingError {
    /// The request body is not an activity the adapter understands.
    #[error("Malformed activity: {0}")]
    BadRequest(String),

    /// The request body exceeds what the adapter will read.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// The request body is not JSON.
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// A downstream channel or service failed.
    #[error("Upstream failure: {0}")]
    Upstream(String),

    /// The agent itself failed while handling the activity.
    #[error("Agent failure: {0}")]
    Internal(String),
}

impl ProcessingError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true when the caller sent something wrong, as opposed to a
    /// failure on this side.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ProcessingError::BadRequest(_)
                | ProcessingError::PayloadTooLarge(_)
                | ProcessingError::UnsupportedMediaType(_)
        )
    }
}
