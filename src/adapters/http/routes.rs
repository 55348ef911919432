//! Axum router configuration for the agent host.

use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{liveness, post_message, readiness};
use super::middleware::{auth_middleware, AuthGate};
use super::state::AppState;

/// Create the agent host router.
///
/// # Routes
///
/// - `POST /api/messages` - Inbound activities, delegated to the message processor
/// - `GET /liveness` - Always `200 OK`
/// - `GET /readiness` - `200 OK` when the readiness probe agrees
///
/// # Layers (outermost first)
///
/// request id -> request id propagation -> tracing -> timeout -> authorization gate
///
/// The gate wraps every route, health probes included, so a rejected request
/// never reaches a handler.
pub fn agent_router(state: AppState, gate: AuthGate, request_timeout: Duration) -> Router {
    Router::new()
        .route("/api/messages", post(post_message))
        .route("/liveness", get(liveness))
        .route("/readiness", get(readiness))
        .layer(middleware::from_fn_with_state(gate, auth_middleware))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
