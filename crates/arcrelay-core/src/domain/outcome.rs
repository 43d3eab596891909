//! Result of one forward through the relay.

use serde_json::Value;

use crate::ports::InferenceError;

/// How a forwarded prompt ended.
///
/// Every forward resolves to exactly one of these. Adapters map them to
/// their own surface (HTTP status codes, CLI output).
#[derive(Debug, Clone, PartialEq)]
pub enum ForwardOutcome {
    /// The upstream returned a payload; it is passed through untouched.
    Success(Value),
    /// A newer request superseded this one before the payload arrived.
    Cancelled,
    /// The upstream rejected the call or the transport failed.
    Failed(String),
}

impl ForwardOutcome {
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<Result<Value, InferenceError>> for ForwardOutcome {
    fn from(result: Result<Value, InferenceError>) -> Self {
        match result {
            Ok(payload) => Self::Success(payload),
            Err(InferenceError::Cancelled) => Self::Cancelled,
            Err(e) => Self::Failed(e.to_string()),
        }
    }
}
