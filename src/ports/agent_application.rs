//! Agent port.
//!
//! The agent's conversational behavior is opaque to the host. The only
//! thing the host asks of it is the adapter that knows how to feed it
//! inbound requests.

use std::sync::Arc;

use super::ChannelAdapter;

/// A conversational agent hosted behind `/api/messages`.
pub trait AgentApplication: Send + Sync {
    /// The adapter that processes inbound messages for this agent.
    ///
    /// Called once at bootstrap; the returned adapter is shared by every
    /// request for the lifetime of the server.
    fn adapter(&self) -> Arc<dyn ChannelAdapter>;
}
