//! The subset of the activity schema the echo agent reads and writes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A channel activity.
///
/// Only `type` is required. Account and conversation references are kept
/// as raw JSON since the echo agent only swaps them around.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_id: Option<String>,
}

impl Activity {
    pub const MESSAGE: &'static str = "message";

    pub fn message(text: impl Into<String>) -> Self {
        Self {
            kind: Self::MESSAGE.to_string(),
            id: None,
            text: Some(text.into()),
            from: None,
            recipient: None,
            conversation: None,
            reply_to_id: None,
        }
    }

    pub fn is_message(&self) -> bool {
        self.kind == Self::MESSAGE
    }

    /// Builds a message activity answering this one: sender and recipient
    /// swapped, same conversation.
    pub fn reply(&self, text: impl Into<String>) -> Self {
        Self {
            from: self.recipient.clone(),
            recipient: self.from.clone(),
            conversation: self.conversation.clone(),
            reply_to_id: self.id.clone(),
            ..Self::message(text)
        }
    }
}
