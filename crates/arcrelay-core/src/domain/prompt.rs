//! Validated chat prompt.

use serde_json::Value;
use thiserror::Error;

/// Why a prompt was rejected before forwarding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    /// The `prompt` field was absent.
    #[error("prompt is missing")]
    Missing,

    /// The `prompt` field was present but not a JSON string.
    #[error("prompt is not a string")]
    NotText,

    /// The prompt was empty or whitespace only.
    #[error("prompt is blank")]
    Blank,
}

/// A prompt that is known to contain non-whitespace text.
///
/// The text is kept as sent; trimming only decides validity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPrompt(String);

impl ChatPrompt {
    /// Validate an owned string.
    pub fn new(text: impl Into<String>) -> Result<Self, PromptError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(PromptError::Blank);
        }
        Ok(Self(text))
    }

    /// Validate an optional, untyped JSON value (as found in a request body).
    pub fn from_json(value: Option<&Value>) -> Result<Self, PromptError> {
        match value {
            None => Err(PromptError::Missing),
            Some(Value::String(text)) => Self::new(text.as_str()),
            Some(_) => Err(PromptError::NotText),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
