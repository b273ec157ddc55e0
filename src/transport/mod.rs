//! HTTP transport.
//!
//! This module provides:
//! - The long-lived, exclusively owned `ClientHandle`
//! - Per-call `ProbeSettings` and the `ProbeSession` guard that reverts them
//! - The bounded HEAD probe and its introspection (`TransferInfo`)

mod client;
mod probe;

// Re-export public API
pub use client::{ClientHandle, ProbeSession, ProbeSettings};
pub use probe::{ProbeOutcome, TransferInfo};
