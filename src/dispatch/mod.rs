//! Dispatch layer.
//!
//! Decodes requests, calls the resolver, and encodes results. Two front ends
//! share it:
//! - [`run_lambda`]: the AWS Lambda custom runtime, one JSON envelope per invocation
//! - [`run_local`]: a line-oriented stdin loop for offline testing

mod envelope;
mod lambda;
mod local;

use crate::config::Config;
use crate::error_handling::RequestError;
use crate::resolve::resolve;
use crate::transport::ClientHandle;

// Re-export public API
pub use envelope::{RequestEnvelope, ResponseEnvelope};
pub use lambda::run_lambda;
pub use local::{format_result, parse_line, run_local, LocalCommand, LocalLine, LocalSummary};

/// Handles one JSON payload end to end.
///
/// # Errors
///
/// Returns a `RequestError` when the payload is malformed or lacks a URL;
/// the resolver is not invoked in that case.
pub async fn handle_payload(
    handle: &mut ClientHandle,
    config: &Config,
    payload: serde_json::Value,
) -> Result<ResponseEnvelope, RequestError> {
    let request = RequestEnvelope::from_value(payload)?.into_request(config)?;
    let result = resolve(handle, &request).await;
    Ok(ResponseEnvelope::from(result))
}
