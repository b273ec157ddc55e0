//! Error handling.
//!
//! This module provides:
//! - Initialization and request-boundary error types
//! - The numeric transport taxonomy (`TransportCode`)
//! - Categorization of `reqwest` failures into that taxonomy
//!
//! Errors are split by where they surface:
//! - **Initialization**: fatal, the process exits
//! - **Request rejection**: malformed input, never reaches the resolver
//! - **Transport**: reported to the caller as `error_code` / `error_message`

mod categorization;
mod types;

// Re-export public API
pub use categorization::categorize_reqwest_error;
pub(crate) use categorization::error_chain_text;
pub use types::{InitializationError, RequestError, TransportCode};
