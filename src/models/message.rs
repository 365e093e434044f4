//! Transient send payloads. Nothing here is ever persisted.

use serde::{Deserialize, Serialize};

/// Caller input for the send operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SendRequest {
    pub from_email: Option<String>,
    pub to_email: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
}

impl SendRequest {
    /// Create a request with all four fields set.
    pub fn new(
        from_email: impl Into<String>,
        to_email: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            from_email: Some(from_email.into()),
            to_email: Some(to_email.into()),
            subject: Some(subject.into()),
            body: Some(body.into()),
        }
    }
}

/// A validated message handed to the mail transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}
