//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together.
//! The Bytez client and the preemptive forwarder are instantiated here and
//! handed to the router as explicit state.

use std::sync::Arc;

use anyhow::{Context, Result};
use arcrelay_core::{InferencePort, RelaySettings};
use arcrelay_runtime::{BytezClient, BytezClientConfig, PreemptiveForwarder};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsConfig {
    /// Allow all origins.
    #[default]
    AllowAll,
    /// Allow specific origins.
    AllowOrigins(Vec<String>),
}

/// Listener configuration for the Axum adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind to.
    pub host: String,
    /// Port for the HTTP server.
    pub port: u16,
    /// CORS configuration.
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Derive listener settings from relay settings.
    pub fn from_settings(settings: &RelaySettings) -> Self {
        let cors = settings
            .cors_origins
            .clone()
            .map_or(CorsConfig::AllowAll, CorsConfig::AllowOrigins);

        Self {
            host: settings.host.clone(),
            port: settings.port,
            cors,
        }
    }

    /// Override the bind host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Override the port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Application context for the Axum adapter.
#[derive(Debug, Clone)]
pub struct AxumContext {
    /// Owner of the single in-flight chat slot.
    pub forwarder: Arc<PreemptiveForwarder>,
}

impl AxumContext {
    pub const fn new(forwarder: Arc<PreemptiveForwarder>) -> Self {
        Self { forwarder }
    }

    /// Build a context around any inference port.
    pub fn from_port(port: Arc<dyn InferencePort>, max_new_tokens: u32) -> Self {
        Self::new(Arc::new(PreemptiveForwarder::new(port, max_new_tokens)))
    }
}

/// Wire the Bytez client and forwarder from relay settings.
pub fn bootstrap(settings: &RelaySettings) -> Result<AxumContext> {
    if !settings.has_api_key() {
        warn!("BYTEZ_KEY not set. Upstream calls will be rejected until it is configured.");
    }

    info!(
        target: "arcrelay.config",
        model_url = %settings.model_url,
        max_new_tokens = settings.max_new_tokens,
        api_key_set = settings.has_api_key(),
        "Relay configured"
    );

    let client = BytezClient::new(BytezClientConfig {
        model_url: settings.model_url.clone(),
        api_key: settings.api_key.clone(),
    })
    .context("Failed to build HTTP client")?;

    Ok(AxumContext::from_port(
        Arc::new(client),
        settings.max_new_tokens,
    ))
}

/// Serve the relay on a pre-bound listener until `shutdown` fires.
pub async fn serve(
    listener: TcpListener,
    ctx: AxumContext,
    cors: &CorsConfig,
    shutdown: CancellationToken,
) -> Result<()> {
    let addr = listener.local_addr()?;
    let app = crate::routes::create_router(ctx, cors);

    info!("Backend running on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;

    info!("Backend shut down");
    Ok(())
}

/// Bootstrap, bind and serve until Ctrl-C.
pub async fn start_server(config: ServerConfig, settings: &RelaySettings) -> Result<()> {
    let ctx = bootstrap(settings)?;

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for Ctrl-C: {e}");
                return;
            }
            info!("Shutdown requested");
            shutdown.cancel();
        }
    });

    serve(listener, ctx, &config.cors, shutdown).await
}
