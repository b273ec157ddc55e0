//! HTTP client initialization.

use log::info;

use crate::config::Config;
use crate::error_handling::InitializationError;
use crate::transport::ClientHandle;

/// Builds the process-wide client handle.
///
/// The handle is created once and reused for every request, so connections
/// and TLS sessions stay warm between invocations.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if the TLS backend cannot
/// be set up.
pub fn init_client(config: &Config) -> Result<ClientHandle, InitializationError> {
    let handle = ClientHandle::new(config)?;
    info!(
        "HTTP client ready: {} idle connections per host, default budget {} ms, default ceiling {} redirects",
        config.max_connections, config.default_max_time_ms, config.default_max_redirects
    );
    Ok(handle)
}
