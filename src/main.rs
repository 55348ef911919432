//! `agent-host` binary: serves the echo agent.

use std::sync::Arc;

use agent_host::adapters::echo::EchoAgent;
use agent_host::config::{AppConfig, LogFormat, ServerConfig};
use agent_host::{start_server_with_config, ServerError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);

    tracing::info!(environment = ?config.server.environment, "Starting agent host");

    let result = start_server_with_config(Arc::new(EchoAgent::new()), config).await;
    if let Err(e) = &result {
        tracing::error!("Agent host failed: {}", e);
    }
    result
}

fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    match server.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}
