//! Application layer - the message processing entry point.
//!
//! This layer sits between the HTTP adapter and the agent-facing ports:
//! the messages route hands its request to a `MessageProcessor`, and
//! `AgentProcess` is the processor used unless one is injected.

mod agent_process;

pub use agent_process::{start_agent_process, AgentProcess};
