//! Application state shared by the agent routes.

use std::sync::Arc;

use crate::adapters::health::AlwaysReady;
use crate::application::AgentProcess;
use crate::config::AuthConfig;
use crate::ports::{AgentApplication, ChannelAdapter, MessageProcessor, ReadinessProbe};

/// Typed context handed to every handler.
///
/// Built once before the server starts and never mutated afterwards;
/// handlers receive cheap clones. Agent, adapter and auth configuration are
/// constructor arguments, so a state without them cannot exist.
#[derive(Clone)]
pub struct AppState {
    agent: Arc<dyn AgentApplication>,
    adapter: Arc<dyn ChannelAdapter>,
    auth_config: Arc<AuthConfig>,
    processor: Arc<dyn MessageProcessor>,
    readiness: Arc<dyn ReadinessProbe>,
}

impl AppState {
    /// Create the state for `agent`, taking its adapter once, up front.
    ///
    /// Messages go through [`AgentProcess`] and readiness is
    /// [`AlwaysReady`] until replaced.
    pub fn new(agent: Arc<dyn AgentApplication>, auth_config: Arc<AuthConfig>) -> Self {
        let adapter = agent.adapter();
        Self {
            agent,
            adapter,
            auth_config,
            processor: Arc::new(AgentProcess::new()),
            readiness: Arc::new(AlwaysReady),
        }
    }

    pub fn with_processor(mut self, processor: Arc<dyn MessageProcessor>) -> Self {
        self.processor = processor;
        self
    }

    pub fn with_readiness(mut self, readiness: Arc<dyn ReadinessProbe>) -> Self {
        self.readiness = readiness;
        self
    }

    pub fn agent(&self) -> Arc<dyn AgentApplication> {
        self.agent.clone()
    }

    pub fn adapter(&self) -> Arc<dyn ChannelAdapter> {
        self.adapter.clone()
    }

    pub fn auth_config(&self) -> Arc<AuthConfig> {
        self.auth_config.clone()
    }

    pub fn processor(&self) -> Arc<dyn MessageProcessor> {
        self.processor.clone()
    }

    pub fn readiness(&self) -> Arc<dyn ReadinessProbe> {
        self.readiness.clone()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("auth_config", &self.auth_config)
            .finish_non_exhaustive()
    }
}
