//! Domain layer containing the hosting vocabulary.
//!
//! # Module Organization
//!
//! - `foundation` - Caller identity, authentication and processing errors

pub mod foundation;
