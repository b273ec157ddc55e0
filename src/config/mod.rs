//! Application configuration and constants.
//!
//! This module provides:
//! - Built-in defaults and environment variable names
//! - The library `Config` and its environment layering
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel, Opt};
