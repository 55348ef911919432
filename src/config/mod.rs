//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `AGENT_HOST` prefix and nested values use double underscores as separators.
//! The conventional `PORT` variable overrides `server.port`.
//!
//! # Example
//!
//! ```no_run
//! use agent_host::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod auth;
mod error;
mod server;

pub use auth::AuthConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, LogFormat, ServerConfig, DEFAULT_PORT};

use serde::Deserialize;

/// Prefix of every environment variable read by [`AppConfig::load()`].
pub const ENV_PREFIX: &str = "AGENT_HOST";

/// Root application configuration
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// Server configuration (port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Authorization configuration; anonymous when no client id is set
    #[serde(default)]
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `AGENT_HOST` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Applies `PORT` on top of `server.port`
    ///
    /// # Environment Variable Format
    ///
    /// - `PORT=3978` -> `server.port = 3978`
    /// - `AGENT_HOST__SERVER__LOG_LEVEL=debug` -> `server.log_level = "debug"`
    /// - `AGENT_HOST__AUTH__CLIENT_ID=...` -> `auth.client_id = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types,
    /// e.g. a non-numeric `PORT`.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = environment_source()?.try_deserialize()?;
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.auth.validate(&self.server.environment)?;
        Ok(())
    }
}

/// Environment-backed configuration source shared by every loader.
pub(crate) fn environment_source() -> Result<config::Config, config::ConfigError> {
    config::Config::builder()
        .add_source(
            config::Environment::default()
                .prefix(ENV_PREFIX)
                .separator("__"),
        )
        .set_override_option("server.port", std::env::var("PORT").ok())?
        .build()
}
