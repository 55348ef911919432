//! HTTP handlers for the agent routes.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::domain::foundation::ProcessingError;
use crate::ports::Readiness;

use super::state::AppState;

/// POST /api/messages - Hand the request to the message processor
///
/// The request goes through untouched and the processor's response comes
/// back untouched.
pub async fn post_message(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, ProcessingError> {
    state
        .processor()
        .process(request, state.agent(), state.adapter())
        .await
}

/// GET /liveness - The process is up
pub async fn liveness() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

/// GET /readiness - Ask the readiness probe
pub async fn readiness(State(state): State<AppState>) -> Response {
    match state.readiness().check().await {
        Readiness::Ready => (StatusCode::OK, "OK").into_response(),
        Readiness::NotReady(reason) => {
            tracing::debug!(%reason, "Readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, reason).into_response()
        }
    }
}
