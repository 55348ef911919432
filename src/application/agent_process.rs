//! AgentProcess - default entry point for inbound messages.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::Request;
use axum::response::Response;

use crate::domain::foundation::ProcessingError;
use crate::ports::{AgentApplication, ChannelAdapter, MessageProcessor};

/// Hands an inbound request to the adapter, on behalf of the agent.
///
/// The request is passed through untouched and the adapter's response or
/// error is returned as-is.
pub async fn start_agent_process(
    request: Request,
    agent: Arc<dyn AgentApplication>,
    adapter: Arc<dyn ChannelAdapter>,
) -> Result<Response, ProcessingError> {
    adapter.process(request, agent).await
}

/// `MessageProcessor` backed by [`start_agent_process`].
#[derive(Debug, Default, Clone, Copy)]
pub struct AgentProcess;

impl AgentProcess {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MessageProcessor for AgentProcess {
    async fn process(
        &self,
        request: Request,
        agent: Arc<dyn AgentApplication>,
        adapter: Arc<dyn ChannelAdapter>,
    ) -> Result<Response, ProcessingError> {
        start_agent_process(request, agent, adapter).await
    }
}
