//! Agent Host - HTTP hosting bootstrap for conversational agents
//!
//! This crate exposes an agent over HTTP: it accepts inbound activities on
//! `POST /api/messages`, answers orchestrator probes on `/liveness` and
//! `/readiness`, and puts an authorization gate in front of every route.
//!
//! ```no_run
//! use std::sync::Arc;
//! use agent_host::adapters::echo::EchoAgent;
//! use agent_host::config::AuthConfig;
//!
//! # async fn run() -> Result<(), agent_host::ServerError> {
//! agent_host::start_server(Arc::new(EchoAgent::new()), AuthConfig::anonymous()).await
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::http::{start_server, start_server_with_config, AgentHost, ServerError};
