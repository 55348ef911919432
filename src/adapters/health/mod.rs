//! Readiness probe adapters.
//!
//! - `AlwaysReady` - default probe, the host is ready as soon as it serves
//! - `ReadinessFlag` - switchable probe for hosts that warm up or drain

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::ports::{Readiness, ReadinessProbe};

/// Probe that always reports ready.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysReady;

#[async_trait]
impl ReadinessProbe for AlwaysReady {
    async fn check(&self) -> Readiness {
        Readiness::Ready
    }
}

/// Probe backed by a flag that the embedding process flips.
#[derive(Debug)]
pub struct ReadinessFlag {
    ready: AtomicBool,
    reason: String,
}

impl ReadinessFlag {
    /// Creates a flag in the not-ready state, reporting `reason` until set.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            ready: AtomicBool::new(false),
            reason: reason.into(),
        }
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }
}

#[async_trait]
impl ReadinessProbe for ReadinessFlag {
    async fn check(&self) -> Readiness {
        if self.ready.load(Ordering::SeqCst) {
            Readiness::Ready
        } else {
            Readiness::not_ready(self.reason.clone())
        }
    }
}
