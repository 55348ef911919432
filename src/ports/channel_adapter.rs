//! Channel adapter port.
//!
//! An adapter bridges inbound HTTP requests and the agent's internal message
//! format. How it parses the request and what it answers is entirely its own
//! business.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::Request;
use axum::response::Response;

use super::AgentApplication;
use crate::domain::foundation::ProcessingError;

/// Processes one inbound request on behalf of an agent.
///
/// # Contract
///
/// Implementations must:
/// - Consume the request as received (headers, extensions, body)
/// - Return the complete HTTP response to send back
/// - Return `ProcessingError` for failures they do not turn into a response themselves
#[async_trait]
pub trait ChannelAdapter: Send + Sync {
    async fn process(
        &self,
        request: Request,
        agent: Arc<dyn AgentApplication>,
    ) -> Result<Response, ProcessingError>;
}
