//! Authorization gate for the agent host.
//!
//! This module provides:
//! - `AuthGate` - decides who may call the host, built from `AuthConfig`
//! - `auth_middleware` - layer that runs the gate and injects the caller into extensions
//! - `AuthRejection` - the response sent when the gate says no
//!
//! # Architecture
//!
//! The gate uses the `TokenValidator` port, keeping it provider-agnostic.
//! Whether using the JWT adapter or a mock for testing, the middleware doesn't change.
//!
//! ```text
//! Request → auth_middleware → injects CallerIdentity into extensions
//!                   ↓ (rejected)            ↓
//!            401 / 503 response     Handler → processor reads it from the request
//! ```
//!
//! # Policy
//!
//! - Anonymous mode (no client id configured): every request passes as
//!   `CallerIdentity::anonymous()`, headers are not inspected.
//! - Otherwise a `Bearer` token is required and must validate.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::auth::JwtTokenValidator;
use crate::config::{AuthConfig, ValidationError};
use crate::domain::foundation::{AuthError, CallerIdentity};
use crate::ports::TokenValidator;

/// Who may call the host.
#[derive(Clone)]
pub struct AuthGate {
    validator: Option<Arc<dyn TokenValidator>>,
}

impl AuthGate {
    /// Gate that admits every request anonymously.
    pub fn anonymous() -> Self {
        Self { validator: None }
    }

    /// Gate that requires a Bearer token accepted by `validator`.
    pub fn require(validator: Arc<dyn TokenValidator>) -> Self {
        Self {
            validator: Some(validator),
        }
    }

    /// Build the gate for an authorization configuration.
    ///
    /// Anonymous configurations get an anonymous gate; all others get a
    /// [`JwtTokenValidator`].
    pub fn from_config(config: &AuthConfig) -> Result<Self, ValidationError> {
        if config.is_anonymous() {
            return Ok(Self::anonymous());
        }
        let validator = JwtTokenValidator::from_config(config)?;
        Ok(Self::require(Arc::new(validator)))
    }

    pub fn is_anonymous(&self) -> bool {
        self.validator.is_none()
    }

    /// Decide on a request given its headers.
    pub async fn authorize(&self, headers: &HeaderMap) -> Result<CallerIdentity, AuthError> {
        let Some(validator) = &self.validator else {
            return Ok(CallerIdentity::anonymous());
        };

        let token = bearer_token(headers).ok_or(AuthError::MissingToken)?;
        validator.validate(token).await
    }
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate")
            .field("anonymous", &self.is_anonymous())
            .finish()
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Authorization middleware.
///
/// This middleware:
/// 1. Runs the `AuthGate` against the request headers
/// 2. On success, injects `CallerIdentity` into request extensions and continues
/// 3. On failure, answers with `AuthRejection` without calling the route
pub async fn auth_middleware(
    State(gate): State<AuthGate>,
    mut request: Request,
    next: Next,
) -> Response {
    match gate.authorize(request.headers()).await {
        Ok(caller) => {
            request.extensions_mut().insert(caller);
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!(path = %request.uri().path(), "Request rejected: {}", e);
            AuthRejection(e).into_response()
        }
    }
}

/// Rejection produced by the gate.
#[derive(Debug, Clone)]
pub struct AuthRejection(pub AuthError);

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (message, code) = match &self.0 {
            AuthError::MissingToken => ("Authentication required", "UNAUTHENTICATED"),
            AuthError::TokenExpired => ("Token expired", "AUTH_ERROR"),
            AuthError::InvalidToken => ("Invalid token", "AUTH_ERROR"),
            AuthError::ServiceUnavailable(msg) => {
                tracing::error!("Auth service unavailable: {}", msg);
                ("Authentication service unavailable", "AUTH_ERROR")
            }
        };

        // Transient failures are 503, token problems 401.
        let status = if self.0.is_transient() {
            StatusCode::SERVICE_UNAVAILABLE
        } else {
            StatusCode::UNAUTHORIZED
        };

        let mut response = (
            status,
            Json(serde_json::json!({
                "error": message,
                "code": code
            })),
        )
            .into_response();

        if self.0.requires_reauthentication() {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}
