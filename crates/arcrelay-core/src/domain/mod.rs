//! Domain types shared by every adapter.

pub mod outcome;
pub mod prompt;

pub use outcome::ForwardOutcome;
pub use prompt::{ChatPrompt, PromptError};
