//! Process-wide resource setup.
//!
//! Everything here runs once at startup, before the first request is read:
//! - Logger
//! - TLS crypto provider
//! - Shared HTTP client handle

mod client;
mod logger;

use rustls::crypto::{ring::default_provider, CryptoProvider};

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;

/// Installs the `ring` crypto provider for `rustls`.
///
/// Must run before the HTTP client is built.
pub fn init_crypto_provider() {
    // Err only means a provider is already installed
    let _ = CryptoProvider::install_default(default_provider());
}
