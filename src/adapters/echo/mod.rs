//! Echo agent.
//!
//! A minimal `AgentApplication` used by the `agent-host` binary: every
//! message activity is answered with the same text prefixed by "Echo: ".
//! Other activity types are acknowledged with `202 Accepted`.

mod activity;

pub use activity::Activity;

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::to_bytes;
use axum::extract::Request;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use http_body_util::LengthLimitError;

use crate::domain::foundation::ProcessingError;
use crate::ports::{AgentApplication, ChannelAdapter};

/// Largest activity body the echo adapter will read.
const MAX_ACTIVITY_BYTES: usize = 256 * 1024;

/// Agent that echoes message text back to the sender.
pub struct EchoAgent {
    adapter: Arc<EchoAdapter>,
}

impl EchoAgent {
    pub fn new() -> Self {
        Self {
            adapter: Arc::new(EchoAdapter),
        }
    }
}

impl Default for EchoAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentApplication for EchoAgent {
    fn adapter(&self) -> Arc<dyn ChannelAdapter> {
        self.adapter.clone()
    }
}

/// Adapter that reads a JSON activity and answers inline.
#[derive(Debug, Default)]
pub struct EchoAdapter;

impl EchoAdapter {
    /// The reply to an inbound activity; only messages get one.
    pub fn reply_to(&self, activity: &Activity) -> Option<Activity> {
        if !activity.is_message() {
            return None;
        }
        let text = activity.text.as_deref().unwrap_or_default();
        Some(activity.reply(format!("Echo: {}", text)))
    }
}

/// Classify a failed body read: over the limit, or a broken body.
fn read_error(error: axum::Error) -> ProcessingError {
    let too_large = std::error::Error::source(&error)
        .is_some_and(|source| source.is::<LengthLimitError>());
    if too_large {
        ProcessingError::PayloadTooLarge(format!(
            "activity exceeds {} bytes",
            MAX_ACTIVITY_BYTES
        ))
    } else {
        ProcessingError::bad_request(error.to_string())
    }
}

#[async_trait]
impl ChannelAdapter for EchoAdapter {
    async fn process(
        &self,
        request: Request,
        _agent: Arc<dyn AgentApplication>,
    ) -> Result<Response, ProcessingError> {
        let is_json = request
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/json"));
        if !is_json {
            return Err(ProcessingError::UnsupportedMediaType(
                "expected application/json".to_string(),
            ));
        }

        let body = to_bytes(request.into_body(), MAX_ACTIVITY_BYTES)
            .await
            .map_err(read_error)?;
        let activity: Activity = serde_json::from_slice(&body)
            .map_err(|e| ProcessingError::bad_request(e.to_string()))?;

        tracing::debug!(kind = %activity.kind, "Echo adapter received activity");

        match self.reply_to(&activity) {
            Some(reply) => Ok((StatusCode::OK, Json(reply)).into_response()),
            None => Ok(StatusCode::ACCEPTED.into_response()),
        }
    }
}
