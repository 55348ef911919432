//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the host to the outside world:
//! - `auth` - Token validators (JWT, mock)
//! - `echo` - Demo agent used by the binary
//! - `health` - Readiness probes
//! - `http` - Router, handlers, authorization gate and server bootstrap

pub mod auth;
pub mod echo;
pub mod health;
pub mod http;
