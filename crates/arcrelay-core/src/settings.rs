//! Relay settings and validation.
//!
//! Settings come from the process environment. Every value has a default
//! except the API key, whose absence is tolerated: the server starts and
//! upstream calls fail with the provider's auth rejection.

use std::fmt;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default hosted model endpoint.
pub const DEFAULT_MODEL_URL: &str =
    "https://api.bytez.com/run/deepseek-ai/deepseek-coder-1.3b-instruct";

/// Default generation limit passed to the model.
pub const DEFAULT_MAX_NEW_TOKENS: u32 = 300;

/// Environment variable names.
pub mod env {
    pub const API_KEY: &str = "BYTEZ_KEY";
    pub const MODEL_URL: &str = "BYTEZ_MODEL_URL";
    pub const MAX_NEW_TOKENS: &str = "BYTEZ_MAX_NEW_TOKENS";
    pub const HOST: &str = "HOST";
    pub const PORT: &str = "PORT";
    pub const CORS_ORIGINS: &str = "CORS_ORIGINS";
}

/// Settings for one relay process.
#[derive(Clone, PartialEq, Eq)]
pub struct RelaySettings {
    /// Bearer credential for the inference API. `None` when unset or blank.
    pub api_key: Option<String>,
    /// Full URL of the model "run" endpoint.
    pub model_url: String,
    /// Token limit forwarded as `model_params.max_new_tokens`.
    pub max_new_tokens: u32,
    /// Address to bind the HTTP listener to.
    pub host: String,
    /// Port to bind the HTTP listener to.
    pub port: u16,
    /// Allowed CORS origins. `None` allows any origin.
    pub cors_origins: Option<Vec<String>>,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model_url: DEFAULT_MODEL_URL.to_string(),
            max_new_tokens: DEFAULT_MAX_NEW_TOKENS,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_origins: None,
        }
    }
}

// Hand-written so the API key never reaches a log line.
impl fmt::Debug for RelaySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelaySettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model_url", &self.model_url)
            .field("max_new_tokens", &self.max_new_tokens)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("cors_origins", &self.cors_origins)
            .finish()
    }
}

impl RelaySettings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut settings = Self::default();

        settings.api_key = get(env::API_KEY);

        if let Some(url) = get(env::MODEL_URL) {
            settings.model_url = url;
        }

        if let Some(raw) = get(env::MAX_NEW_TOKENS) {
            settings.max_new_tokens = raw
                .parse()
                .map_err(|_| SettingsError::InvalidMaxNewTokens(raw))?;
        }

        if let Some(host) = get(env::HOST) {
            settings.host = host;
        }

        if let Some(raw) = get(env::PORT) {
            settings.port = raw.parse().map_err(|_| SettingsError::InvalidPort(raw))?;
        }

        settings.cors_origins = get(env::CORS_ORIGINS).map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect()
        });

        validate_settings(&settings)?;
        Ok(settings)
    }

    /// Whether a bearer credential is configured.
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// `host:port` string suitable for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Settings validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("PORT must be an integer between 0 and 65535, got {0:?}")]
    InvalidPort(String),

    #[error("BYTEZ_MAX_NEW_TOKENS must be a positive integer, got {0:?}")]
    InvalidMaxNewTokens(String),

    #[error("Model URL must start with http:// or https://, got {0:?}")]
    InvalidModelUrl(String),
}

/// Validate settings values.
pub fn validate_settings(settings: &RelaySettings) -> Result<(), SettingsError> {
    if settings.max_new_tokens == 0 {
        return Err(SettingsError::InvalidMaxNewTokens("0".to_string()));
    }

    let url = settings.model_url.as_str();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(SettingsError::InvalidModelUrl(url.to_string()));
    }

    Ok(())
}
