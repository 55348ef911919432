//! Foundation module - Shared domain primitives.
//!
//! Contains the identity and error types exchanged between the HTTP
//! adapter, the authorization gate and the agent-facing ports.

mod auth;
mod processing;

pub use auth::{AuthError, CallerIdentity};
pub use processing::ProcessingError;
