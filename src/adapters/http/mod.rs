//! HTTP adapter - the hosting surface.
//!
//! - `state` - `AppState`, the typed context injected into every handler
//! - `handlers` - message intake and health probe handlers
//! - `routes` - route table and layer stack
//! - `middleware` - the authorization gate
//! - `server` - `AgentHost` and `start_server`

mod error;
mod handlers;
pub mod middleware;
mod routes;
mod server;
mod state;

pub use handlers::{liveness, post_message, readiness};
pub use middleware::{auth_middleware, AuthGate, AuthRejection};
pub use routes::agent_router;
pub use server::{start_server, start_server_with_config, AgentHost, ServerError};
pub use state::AppState;
