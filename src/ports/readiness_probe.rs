//! Readiness probe port.
//!
//! `/readiness` asks a probe whether the process should receive traffic.
//! The default probe always says yes; deployments that depend on downstream
//! services plug in their own check.

use async_trait::async_trait;

/// Result of a readiness check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    NotReady(String),
}

impl Readiness {
    pub fn not_ready(reason: impl Into<String>) -> Self {
        Self::NotReady(reason.into())
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready)
    }
}

/// Decides whether the host is ready to serve requests.
#[async_trait]
pub trait ReadinessProbe: Send + Sync {
    async fn check(&self) -> Readiness;
}
