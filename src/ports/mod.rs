//! Ports - Interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the hosting layer and the pieces it only invokes. Adapters implement
//! these ports.
//!
//! ## Agent Ports
//!
//! - `AgentApplication` - The conversational agent, owner of its adapter
//! - `ChannelAdapter` - Turns an inbound HTTP request into an agent turn
//! - `MessageProcessor` - Entry point the messages route delegates to
//!
//! ## Hosting Ports
//!
//! - `TokenValidator` - Bearer token validation for the authorization gate
//! - `ReadinessProbe` - Pluggable readiness predicate

mod agent_application;
mod channel_adapter;
mod message_processor;
mod readiness_probe;
mod token_validator;

pub use agent_application::AgentApplication;
pub use channel_adapter::ChannelAdapter;
pub use message_processor::MessageProcessor;
pub use readiness_probe::{Readiness, ReadinessProbe};
pub use token_validator::TokenValidator;
