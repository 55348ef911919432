//! Token validation port for the authorization gate.
//!
//! This port defines the contract for validating Bearer tokens presented on
//! inbound requests. It is provider-agnostic: the JWT adapter and the mock
//! used in tests both implement it, and the gate does not change between
//! them.
//!
//! # Example Implementation
//!
//! ```ignore
//! pub struct JwksValidator { ... }
//!
//! #[async_trait]
//! impl TokenValidator for JwksValidator {
//!     async fn validate(&self, token: &str) -> Result<CallerIdentity, AuthError> {
//!         // 1. Resolve signing key
//!         // 2. Validate iss, aud, exp claims
//!         // 3. Map claims to CallerIdentity
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, CallerIdentity};

/// Validates Bearer tokens and extracts the caller identity.
///
/// # Contract
///
/// Implementations must:
/// - Validate the token signature
/// - Validate issuer, audience, and expiry claims
/// - Return `AuthError::InvalidToken` for malformed/bad signature tokens
/// - Return `AuthError::TokenExpired` for expired tokens
/// - Return `AuthError::ServiceUnavailable` for transient errors
#[async_trait]
pub trait TokenValidator: Send + Sync {
    /// Validate a raw token (without the "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<CallerIdentity, AuthError>;
}
