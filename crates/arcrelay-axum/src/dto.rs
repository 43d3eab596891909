//! Response bodies and the fixed texts the gateway returns.

use serde::Serialize;

/// Body of `GET /`.
pub const STATUS_MESSAGE: &str =
    "✅ Arc AI Backend is running. POST /chat with JSON { prompt: '...' }";

/// `GET /ping` body when the model answered.
pub const PING_WARMED: &str = "pong - model warmed";

/// `GET /ping` body when the keep-alive call failed.
pub const PING_FAILED: &str = "pong - ping attempt failed (ignored)";

/// Error text for a missing, non-string or blank prompt.
pub const INVALID_PROMPT: &str = "prompt must be a non-empty string";

/// Error text for a chat request preempted by a newer one.
pub const ABORTED_BY_NEWER: &str = "Request aborted by server due to a newer request.";

/// Error text for upstream and transport failures.
pub const SERVER_ERROR: &str = "Server error";

/// JSON error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}
