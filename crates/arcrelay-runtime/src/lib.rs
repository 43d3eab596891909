#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]

pub mod bytez;
pub mod forwarder;

pub use bytez::{BytezClient, BytezClientConfig};
pub use forwarder::{PING_PROMPT, PreemptiveForwarder};
