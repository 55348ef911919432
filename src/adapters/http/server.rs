//! Server bootstrap: assembles the host and runs it until shutdown.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;

use super::middleware::AuthGate;
use super::routes::agent_router;
use super::state::AppState;
use crate::config::{AppConfig, AuthConfig, ConfigError, ServerConfig};
use crate::ports::{AgentApplication, MessageProcessor, ReadinessProbe, TokenValidator};

/// Errors that stop the host from starting or keep it from serving.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] io::Error),
}

/// A fully wired agent host, ready to serve.
///
/// # Example
///
/// ```ignore
/// let host = AgentHost::new(agent, AuthConfig::anonymous())?
///     .with_readiness(probe);
/// host.serve(&ServerConfig::load()?).await?;
/// ```
#[derive(Debug)]
pub struct AgentHost {
    state: AppState,
    gate: AuthGate,
    request_timeout: Duration,
}

impl AgentHost {
    /// Assemble the host for `agent`.
    ///
    /// Fails when `auth` names a client id the gate cannot validate tokens
    /// for, e.g. without a signing key.
    pub fn new(agent: Arc<dyn AgentApplication>, auth: AuthConfig) -> Result<Self, ServerError> {
        let gate = AuthGate::from_config(&auth).map_err(ConfigError::from)?;
        Ok(Self {
            state: AppState::new(agent, Arc::new(auth)),
            gate,
            request_timeout: ServerConfig::default().request_timeout(),
        })
    }

    pub fn with_processor(mut self, processor: Arc<dyn MessageProcessor>) -> Self {
        self.state = self.state.with_processor(processor);
        self
    }

    pub fn with_readiness(mut self, readiness: Arc<dyn ReadinessProbe>) -> Self {
        self.state = self.state.with_readiness(readiness);
        self
    }

    /// Replace the configured validator; the gate then requires a token.
    pub fn with_token_validator(mut self, validator: Arc<dyn TokenValidator>) -> Self {
        self.gate = AuthGate::require(validator);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn router(&self) -> Router {
        agent_router(self.state.clone(), self.gate.clone(), self.request_timeout)
    }

    /// Serve on `0.0.0.0:<port>` until Ctrl-C or SIGTERM.
    pub async fn serve(self, config: &ServerConfig) -> Result<(), ServerError> {
        self.with_request_timeout(config.request_timeout())
            .serve_until(config.socket_addr(), shutdown_signal())
            .await
    }

    /// Bind `addr` and serve until `shutdown` resolves.
    pub async fn serve_until<F>(self, addr: SocketAddr, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        self.serve_listener(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve_listener<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr().map_err(ServerError::Serve)?;
        let router = self.router();

        tracing::info!(%addr, anonymous = self.gate.is_anonymous(), "Agent host listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(ServerError::Serve)?;

        tracing::info!("Agent host stopped");
        Ok(())
    }
}

/// Start the agent host.
///
/// Reads the server configuration from the environment (`PORT`, default
/// 8088), installs the authorization gate for `auth_configuration`, binds
/// `0.0.0.0` and serves until the process is asked to stop. Any startup or
/// serving failure is returned as is.
pub async fn start_server(
    agent: Arc<dyn AgentApplication>,
    auth_configuration: AuthConfig,
) -> Result<(), ServerError> {
    let server = ServerConfig::load()?;
    start_server_with_config(
        agent,
        AppConfig {
            server,
            auth: auth_configuration,
        },
    )
    .await
}

/// Start the agent host with configuration the caller already loaded.
///
/// The configuration is validated before anything is bound.
pub async fn start_server_with_config(
    agent: Arc<dyn AgentApplication>,
    config: AppConfig,
) -> Result<(), ServerError> {
    config.validate().map_err(ConfigError::from)?;

    AgentHost::new(agent, config.auth)?
        .serve(&config.server)
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
