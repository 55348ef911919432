//! Authorization configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Authorization configuration for the inbound gate.
///
/// Without a client id the host runs in anonymous mode: every request is
/// admitted with an anonymous caller identity.
#[derive(Debug, Default, Deserialize)]
pub struct AuthConfig {
    /// Application (client) id; expected audience of inbound tokens
    pub client_id: Option<String>,

    /// Directory tenant; adds the tenant's token issuers when set
    pub tenant_id: Option<String>,

    /// Accepted token issuers (comma-separated)
    pub issuers: Option<String>,

    /// HS256 key used to verify inbound tokens
    pub signing_key: Option<SecretString>,
}

impl AuthConfig {
    /// Configuration that admits every request anonymously.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Configuration that requires tokens for `client_id` signed with `signing_key`.
    pub fn with_client(client_id: impl Into<String>, signing_key: impl Into<String>) -> Self {
        Self {
            client_id: Some(client_id.into()),
            signing_key: Some(SecretString::new(signing_key.into())),
            ..Self::default()
        }
    }

    /// True when no client id is configured.
    pub fn is_anonymous(&self) -> bool {
        self.client_id.as_deref().map_or(true, str::is_empty)
    }

    /// The signing key, if configured and non-empty.
    pub fn signing_key(&self) -> Option<&str> {
        self.signing_key
            .as_ref()
            .map(|k| k.expose_secret().as_str())
            .filter(|k| !k.is_empty())
    }

    /// Accepted issuers: the configured list plus the tenant's v1 and v2
    /// issuers when a tenant id is set. Empty means any issuer.
    pub fn issuers_list(&self) -> Vec<String> {
        let mut issuers: Vec<String> = self
            .issuers
            .as_ref()
            .map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        if let Some(tenant) = self.tenant_id.as_deref().filter(|t| !t.is_empty()) {
            issuers.push(format!("https://sts.windows.net/{}/", tenant));
            issuers.push(format!("https://login.microsoftonline.com/{}/v2.0", tenant));
        }

        issuers
    }

    /// Validate authorization configuration
    ///
    /// A client id requires a signing key. Anonymous mode is refused in
    /// production.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.is_anonymous() {
            if *environment == Environment::Production {
                return Err(ValidationError::AnonymousInProduction);
            }
            return Ok(());
        }

        if self.signing_key().is_none() {
            return Err(ValidationError::MissingRequired("SIGNING_KEY"));
        }

        for issuer in self.issuers_list() {
            if !(issuer.starts_with("https://") || issuer.starts_with("http://")) {
                return Err(ValidationError::InvalidIssuer(issuer));
            }
        }

        Ok(())
    }
}
