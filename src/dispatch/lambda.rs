//! AWS Lambda entry point.
//!
//! Lambda delivers one invocation at a time per instance, but the runtime's
//! handler must be shareable, so the client handle sits behind an async mutex
//! that serializes probes.

use std::sync::Arc;

use lambda_runtime::{service_fn, Diagnostic, LambdaEvent};
use log::{info, warn};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::config::Config;
use crate::error_handling::RequestError;
use crate::transport::ClientHandle;

use super::{handle_payload, ResponseEnvelope};

/// Converts a rejected envelope into the runtime's error report.
fn diagnostic(error: &RequestError) -> Diagnostic {
    Diagnostic {
        error_type: error.kind().to_string(),
        error_message: error.to_string(),
    }
}

/// Serves Lambda invocations until the runtime shuts the process down.
///
/// Each invocation payload is a request envelope; the response is a
/// [`ResponseEnvelope`]. Malformed envelopes are reported to the runtime as
/// invocation errors without touching the network.
///
/// # Errors
///
/// Returns the runtime's error if the Lambda runtime API becomes unreachable.
pub async fn run_lambda(handle: ClientHandle, config: Config) -> Result<(), lambda_runtime::Error> {
    let handle = Arc::new(Mutex::new(handle));
    let config = Arc::new(config);
    info!("Serving Lambda invocations");

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let handle = Arc::clone(&handle);
        let config = Arc::clone(&config);
        async move {
            let (payload, context) = event.into_parts();
            let mut handle = handle.lock().await;
            match handle_payload(&mut handle, &config, payload).await {
                Ok(response) => {
                    info!(
                        "Invocation {} finished with error_code={} in {} ms",
                        context.request_id, response.error_code, response.duration_ms
                    );
                    Ok::<ResponseEnvelope, Diagnostic>(response)
                }
                Err(e) => {
                    warn!("Invocation {} rejected: {}", context.request_id, e);
                    Err(diagnostic(&e))
                }
            }
        }
    }))
    .await
}
