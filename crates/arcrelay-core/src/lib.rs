#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod ports;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{ChatPrompt, ForwardOutcome, PromptError};
pub use ports::{InferenceError, InferencePort, InferenceRequest, ModelParams};
pub use settings::{
    DEFAULT_HOST, DEFAULT_MAX_NEW_TOKENS, DEFAULT_MODEL_URL, DEFAULT_PORT, RelaySettings,
    SettingsError, validate_settings,
};
