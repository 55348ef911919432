//! Mock token validator for testing.
//!
//! Implements the `TokenValidator` port without real tokens, so router and
//! gate tests can run without signing anything.
//!
//! # Example
//!
//! ```ignore
//! use agent_host::adapters::auth::MockTokenValidator;
//!
//! // Create a validator that accepts specific tokens
//! let validator = MockTokenValidator::new().with_app("valid-token", "channel-service");
//!
//! let result = validator.validate("valid-token").await;
//! assert!(result.is_ok());
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::foundation::{AuthError, CallerIdentity};
use crate::ports::TokenValidator;

/// Mock token validator for testing.
///
/// Stores a map of tokens to callers. Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockTokenValidator {
    /// Map of valid tokens to their associated callers
    tokens: HashMap<String, CallerIdentity>,
    /// Optional error to return for all validations (for error testing)
    force_error: Option<AuthError>,
    calls: AtomicUsize,
}

impl MockTokenValidator {
    /// Creates a new empty mock validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a caller.
    pub fn with_caller(mut self, token: impl Into<String>, caller: CallerIdentity) -> Self {
        self.tokens.insert(token.into(), caller);
        self
    }

    /// Adds a valid token for a caller with the given app id.
    pub fn with_app(self, token: impl Into<String>, app_id: impl Into<String>) -> Self {
        let mut claims = HashMap::new();
        claims.insert("appid".to_string(), Value::String(app_id.into()));
        self.with_caller(token, CallerIdentity::from_claims(claims))
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(mut self, error: AuthError) -> Self {
        self.force_error = Some(error);
        self
    }

    /// Returns how many times `validate` has been called.
    pub fn validation_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenValidator for MockTokenValidator {
    async fn validate(&self, token: &str) -> Result<CallerIdentity, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = &self.force_error {
            return Err(error.clone());
        }

        self.tokens
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
