//! Message processing entry point port.
//!
//! The `/api/messages` handler delegates the whole request to a
//! `MessageProcessor`. The default implementation,
//! [`AgentProcess`](crate::application::AgentProcess), hands the request to
//! the agent's adapter; tests and embedders can swap in their own.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::Request;
use axum::response::Response;

use super::{AgentApplication, ChannelAdapter};
use crate::domain::foundation::ProcessingError;

/// Turns an authorized inbound request into the HTTP response for it.
///
/// # Contract
///
/// - `request` is the request exactly as the route received it, including
///   the `CallerIdentity` the authorization gate put in its extensions
/// - `agent` and `adapter` are the instances injected at bootstrap
/// - The returned response is sent to the client without modification
#[async_trait]
pub trait MessageProcessor: Send + Sync {
    async fn process(
        &self,
        request: Request,
        agent: Arc<dyn AgentApplication>,
        adapter: Arc<dyn ChannelAdapter>,
    ) -> Result<Response, ProcessingError>;
}
