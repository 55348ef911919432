//! HTTP middleware for axum.
//!
//! - `auth` - The authorization gate placed in front of every route

pub mod auth;

pub use auth::{auth_middleware, AuthGate, AuthRejection};
