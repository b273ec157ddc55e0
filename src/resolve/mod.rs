//! Redirect resolution engine.
//!
//! Given a [`ResolutionRequest`] and the shared [`crate::ClientHandle`],
//! performs one bounded probe and classifies the outcome:
//! - a terminal URL (`reached_redirect_limit = false`)
//! - the next hop when the ceiling stopped the walk (`reached_redirect_limit = true`)
//! - a transport failure, code passed through unchanged

mod resolver;
mod types;

// Re-export public API
pub use resolver::resolve;
pub use types::{ResolutionRequest, ResolutionResult};
