//! Command-line surface of the arcrelay binary.
//!
//! `main.rs` is the composition root; this library holds the argument
//! parser and logging setup so they can be unit tested.

#![deny(unused_crate_dependencies)]

// Used by main.rs binary
use anyhow as _;
use arcrelay_axum as _;
use dotenvy as _;
use tokio as _;

pub mod logging;
pub mod parser;

pub use logging::init_tracing;
pub use parser::Cli;
