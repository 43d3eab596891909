//! Bytez inference client.
//!
//! Implements [`InferencePort`] over the Bytez "run" HTTP API:
//! `POST <model_url>` with a bearer key and a JSON body of
//! `{"input": ..., "model_params": {"max_new_tokens": ...}}`. The response
//! payload is treated as opaque JSON.

use std::fmt;

use arcrelay_core::{InferenceError, InferencePort, InferenceRequest};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Connection settings for [`BytezClient`].
#[derive(Clone)]
pub struct BytezClientConfig {
    /// Full URL of the model "run" endpoint.
    pub model_url: String,
    /// Bearer credential. No `Authorization` header is sent when `None`.
    pub api_key: Option<String>,
}

impl fmt::Debug for BytezClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BytezClientConfig")
            .field("model_url", &self.model_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// reqwest-backed client for one hosted Bytez model.
#[derive(Clone)]
pub struct BytezClient {
    client: Client,
    config: BytezClientConfig,
}

impl fmt::Debug for BytezClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BytezClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl BytezClient {
    /// Build a client with its own connection pool.
    pub fn new(config: BytezClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().pool_max_idle_per_host(10).build()?;
        Ok(Self::with_client(client, config))
    }

    /// Build a client on top of an existing reqwest [`Client`].
    pub const fn with_client(client: Client, config: BytezClientConfig) -> Self {
        Self { client, config }
    }

    async fn send(&self, request: &InferenceRequest) -> Result<Value, InferenceError> {
        let mut builder = self.client.post(&self.config.model_url).json(request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| InferenceError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                debug!(status = %status, error = %e, "Failed to read upstream error body");
                String::new()
            });
            return Err(InferenceError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| InferenceError::Transport(e.to_string()))?;

        serde_json::from_slice(&bytes).map_err(|e| InferenceError::Decode(e.to_string()))
    }
}

#[async_trait]
impl InferencePort for BytezClient {
    async fn run(
        &self,
        request: InferenceRequest,
        cancel: CancellationToken,
    ) -> Result<Value, InferenceError> {
        debug!(url = %self.config.model_url, "Calling Bytez model");

        // Dropping the send future aborts the underlying connection.
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!("Bytez call cancelled before completion");
                Err(InferenceError::Cancelled)
            }
            result = self.send(&request) => result,
        }
    }
}
