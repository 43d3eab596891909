//! Inference port for outbound model calls.
//!
//! This port defines the interface the forwarder uses to reach the hosted
//! inference API. It abstracts the HTTP transport away from the preemption
//! logic so the latter can be exercised without a network.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Generation parameters sent alongside the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelParams {
    /// Upper bound on generated tokens. Opaque to the relay.
    pub max_new_tokens: u32,
}

/// Body of one outbound inference call.
///
/// Serializes to `{"input": ..., "model_params": {"max_new_tokens": ...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InferenceRequest {
    /// Prompt text, forwarded as received.
    pub input: String,
    /// Generation parameters.
    pub model_params: ModelParams,
}

impl InferenceRequest {
    #[must_use]
    pub fn new(input: impl Into<String>, max_new_tokens: u32) -> Self {
        Self {
            input: input.into(),
            model_params: ModelParams { max_new_tokens },
        }
    }
}

/// Errors that can occur during an outbound inference call.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// The cancellation token fired before the payload was read.
    #[error("Request cancelled")]
    Cancelled,

    /// The upstream answered with a non-2xx status.
    #[error("Bytez API error: {status} {body}")]
    Upstream {
        /// Numeric HTTP status.
        status: u16,
        /// Response body text (may be empty).
        body: String,
    },

    /// Network or transport failure unrelated to cancellation.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A 2xx response whose body was not valid JSON.
    #[error("Invalid upstream payload: {0}")]
    Decode(String),
}

/// Port for running a prompt against the hosted model.
///
/// Implementations must observe `cancel`: once it fires, the call should
/// abandon any pending network work and return [`InferenceError::Cancelled`].
/// A payload that has already been fully received may still be returned.
#[async_trait]
pub trait InferencePort: Send + Sync + fmt::Debug {
    /// Send `request` upstream and return the opaque JSON payload.
    async fn run(
        &self,
        request: InferenceRequest,
        cancel: CancellationToken,
    ) -> Result<Value, InferenceError>;
}
