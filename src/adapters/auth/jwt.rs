//! JWT adapter for Bearer token validation.
//!
//! This adapter implements the `TokenValidator` port with `jsonwebtoken`.
//! It validates tokens by:
//!
//! 1. Checking the HS256 signature against the configured signing key
//! 2. Validating audience (the client id), issuer and expiry claims
//! 3. Mapping the claims to the domain `CallerIdentity` type
//!
//! # Example
//!
//! ```ignore
//! use agent_host::adapters::auth::JwtTokenValidator;
//! use agent_host::config::AuthConfig;
//!
//! let config = AuthConfig::with_client("my-bot", "signing-key");
//! let validator = JwtTokenValidator::from_config(&config)?;
//! let caller = validator.validate("eyJ...").await?;
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::Value;

use crate::config::{AuthConfig, ValidationError};
use crate::domain::foundation::{AuthError, CallerIdentity};
use crate::ports::TokenValidator;

/// Clock skew tolerated on `exp`/`nbf`, in seconds.
const CLOCK_SKEW_SECS: u64 = 300;

/// Validates HS256-signed JWTs issued for this host's client id.
pub struct JwtTokenValidator {
    audience: String,
    issuers: Vec<String>,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenValidator {
    /// Create a validator for tokens addressed to `audience`.
    ///
    /// An empty `issuers` list accepts any issuer.
    pub fn new(audience: impl Into<String>, signing_key: &str, issuers: Vec<String>) -> Self {
        let audience = audience.into();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&audience]);
        if !issuers.is_empty() {
            validation.set_issuer(issuers.as_slice());
        }
        validation.validate_exp = true;
        validation.leeway = CLOCK_SKEW_SECS;

        Self {
            audience,
            issuers,
            decoding_key: DecodingKey::from_secret(signing_key.as_bytes()),
            validation,
        }
    }

    /// Build a validator from the authorization configuration.
    ///
    /// # Errors
    ///
    /// Returns `MissingRequired` when the configuration has no client id
    /// (anonymous mode) or no signing key.
    pub fn from_config(config: &AuthConfig) -> Result<Self, ValidationError> {
        let audience = config
            .client_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(ValidationError::MissingRequired("CLIENT_ID"))?;
        let signing_key = config
            .signing_key()
            .ok_or(ValidationError::MissingRequired("SIGNING_KEY"))?;

        Ok(Self::new(audience, signing_key, config.issuers_list()))
    }
}

#[async_trait]
impl TokenValidator for JwtTokenValidator {
    async fn validate(&self, token: &str) -> Result<CallerIdentity, AuthError> {
        let token_data = decode::<HashMap<String, Value>>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token expired");
                        AuthError::TokenExpired
                    }
                    ErrorKind::InvalidIssuer => {
                        tracing::warn!("Invalid issuer in token");
                        AuthError::InvalidToken
                    }
                    ErrorKind::InvalidAudience => {
                        tracing::warn!("Invalid audience in token");
                        AuthError::InvalidToken
                    }
                    _ => {
                        tracing::warn!("Token validation failed: {}", e);
                        AuthError::InvalidToken
                    }
                }
            })?;

        Ok(CallerIdentity::from_claims(token_data.claims))
    }
}

impl std::fmt::Debug for JwtTokenValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenValidator")
            .field("audience", &self.audience)
            .field("issuers", &self.issuers)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;
    use std::time::{SystemTime, UNIX_EPOCH};

    const KEY: &str = "test-signing-key";
    const ISSUER: &str = "https://api.botframework.com";

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64
    }

    fn token(claims: Value, key: &str) -> String {
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(key.as_bytes()),
        )
        .unwrap()
    }

    fn valid_claims() -> Value {
        json!({
            "aud": "my-bot",
            "iss": ISSUER,
            "appid": "channel-service",
            "exp": now() + 3600,
        })
    }

    fn validator() -> JwtTokenValidator {
        JwtTokenValidator::new("my-bot", KEY, vec![ISSUER.to_string()])
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Validation Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn accepts_valid_token() {
        let caller = validator()
            .validate(&token(valid_claims(), KEY))
            .await
            .unwrap();

        assert!(caller.is_authenticated());
        assert_eq!(caller.app_id.as_deref(), Some("channel-service"));
        assert_eq!(caller.issuer.as_deref(), Some(ISSUER));
    }

    #[tokio::test]
    async fn rejects_expired_token() {
        let mut claims = valid_claims();
        claims["exp"] = json!(now() - 3600);

        let result = validator().validate(&token(claims, KEY)).await;

        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[tokio::test]
    async fn tolerates_small_clock_skew() {
        let mut claims = valid_claims();
        claims["exp"] = json!(now() - 60);

        assert!(validator().validate(&token(claims, KEY)).await.is_ok());
    }

    #[tokio::test]
    async fn rejects_wrong_audience() {
        let mut claims = valid_claims();
        claims["aud"] = json!("someone-else");

        let result = validator().validate(&token(claims, KEY)).await;

        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn rejects_unlisted_issuer() {
        let mut claims = valid_claims();
        claims["iss"] = json!("https://evil.example.com");

        let result = validator().validate(&token(claims, KEY)).await;

        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn any_issuer_when_list_empty() {
        let validator = JwtTokenValidator::new("my-bot", KEY, vec![]);
        let mut claims = valid_claims();
        claims["iss"] = json!("https://issuer.example.com");

        assert!(validator.validate(&token(claims, KEY)).await.is_ok());
    }

    #[tokio::test]
    async fn rejects_wrong_signature() {
        let result = validator()
            .validate(&token(valid_claims(), "another-key"))
            .await;

        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn rejects_garbage() {
        let result = validator().validate("not.a.jwt").await;

        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn from_config_requires_client_id() {
        let result = JwtTokenValidator::from_config(&AuthConfig::anonymous());
        assert!(matches!(
            result,
            Err(ValidationError::MissingRequired("CLIENT_ID"))
        ));
    }

    #[test]
    fn from_config_requires_signing_key() {
        let config = AuthConfig {
            client_id: Some("my-bot".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            JwtTokenValidator::from_config(&config),
            Err(ValidationError::MissingRequired("SIGNING_KEY"))
        ));
    }

    #[tokio::test]
    async fn from_config_uses_tenant_issuers() {
        let config = AuthConfig {
            tenant_id: Some("tenant-1".to_string()),
            ..AuthConfig::with_client("my-bot", KEY)
        };
        let validator = JwtTokenValidator::from_config(&config).unwrap();

        let mut claims = valid_claims();
        claims["iss"] = json!("https://sts.windows.net/tenant-1/");
        assert!(validator.validate(&token(claims, KEY)).await.is_ok());

        // Tenant issuers replace "any issuer"
        let result = validator.validate(&token(valid_claims(), KEY)).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn debug_omits_key() {
        let rendered = format!("{:?}", validator());
        assert!(rendered.contains("my-bot"));
        assert!(!rendered.contains(KEY));
    }

    #[test]
    fn jwt_validator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<JwtTokenValidator>();
    }
}
