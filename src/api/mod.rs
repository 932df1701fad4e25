//! API Module
//!
//! Host-facing commands over the scoring core. The core returns typed data
//! only; turning it into a wire format happens here.

pub mod commands;

pub use commands::{execute, handle_line, Command, Response};
