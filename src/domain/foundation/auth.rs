//! Authentication types for the domain layer.
//!
//! These types represent the caller of an inbound request after the
//! authorization gate has run. Any token provider can populate them via the
//! `TokenValidator` port; anonymous callers get a fixed identity.
//!
//! # Example
//!
//! ```ignore
//! // In HTTP middleware, after JWT validation:
//! let caller = validator.validate(token).await?;
//!
//! // Inject into request extensions so the processor sees it
//! request.extensions_mut().insert(caller);
//! ```

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

/// Identity of the party that sent an inbound request.
///
/// Either built from validated token claims or the anonymous identity used
/// when the host runs without a client id.
#[derive(Debug, Clone, PartialEq)]
pub struct CallerIdentity {
    /// Calling application id (`appid`, `azp` or `sub` claim).
    pub app_id: Option<String>,

    /// Token issuer, if the caller presented a token.
    pub issuer: Option<String>,

    /// All claims carried by the token.
    pub claims: HashMap<String, Value>,

    authenticated: bool,
}

impl CallerIdentity {
    /// Creates an identity from validated token claims.
    ///
    /// The app id is taken from the first of `appid`, `azp` or `sub`
    /// that is present as a string.
    pub fn from_claims(claims: HashMap<String, Value>) -> Self {
        let app_id = ["appid", "azp", "sub"]
            .iter()
            .find_map(|key| claims.get(*key).and_then(Value::as_str))
            .map(str::to_string);
        let issuer = claims.get("iss").and_then(Value::as_str).map(str::to_string);

        Self {
            app_id,
            issuer,
            claims,
            authenticated: true,
        }
    }

    /// The identity given to callers when no client id is configured.
    pub fn anonymous() -> Self {
        Self {
            app_id: None,
            issuer: None,
            claims: HashMap::new(),
            authenticated: false,
        }
    }

    /// Returns true if this identity came from a validated token.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}

/// Authentication errors that can occur at the authorization gate.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// No Bearer token was presented and anonymous access is off.
    #[error("Authorization header missing")]
    MissingToken,

    /// The token is malformed, has a bad signature or wrong audience/issuer.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired (separate from InvalidToken for specific handling).
    #[error("Token expired")]
    TokenExpired,

    /// The token validator cannot be reached or is misconfigured.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if the caller should obtain a new token.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::MissingToken | AuthError::InvalidToken | AuthError::TokenExpired
        )
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}
