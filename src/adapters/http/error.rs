//! HTTP rendering of processing errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::domain::foundation::ProcessingError;

impl ProcessingError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProcessingError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ProcessingError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ProcessingError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ProcessingError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ProcessingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ProcessingError::BadRequest(_) => "BAD_REQUEST",
            ProcessingError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            ProcessingError::UnsupportedMediaType(_) => "UNSUPPORTED_MEDIA_TYPE",
            ProcessingError::Upstream(_) => "UPSTREAM_ERROR",
            ProcessingError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ProcessingError {
    fn into_response(self) -> Response {
        if !self.is_client_error() {
            tracing::error!("Message processing failed: {}", self);
        }

        (
            self.status_code(),
            Json(serde_json::json!({
                "error": self.to_string(),
                "code": self.code()
            })),
        )
            .into_response()
    }
}
