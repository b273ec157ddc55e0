//! Redirect resolution.
//!
//! Applies per-call overrides to the shared handle, probes, reverts, and
//! turns the transport outcome into a [`ResolutionResult`].

use std::time::Instant;

use log::{debug, error, warn};

use crate::error_handling::TransportCode;
use crate::transport::{ClientHandle, ProbeOutcome, ProbeSettings};
use crate::utils::elapsed_ms;

use super::types::{ResolutionRequest, ResolutionResult};

/// Resolves `request` to its destination.
///
/// The handle's per-call settings are restored before this returns, on every
/// path. The resolver never retries.
///
/// The time budget is best-effort: DNS resolution inside the HTTP stack can
/// overrun it, so callers must enforce their own deadline.
///
/// # Example
///
/// ```no_run
/// use url_expander::{resolve, ClientHandle, Config, ResolutionRequest};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut handle = ClientHandle::new(&Config::default())?;
/// let request = ResolutionRequest::new("bit.ly/example", 2000, 5)?;
/// let result = resolve(&mut handle, &request).await;
/// println!("{:?}", result);
/// # Ok(())
/// # }
/// ```
pub async fn resolve(handle: &mut ClientHandle, request: &ResolutionRequest) -> ResolutionResult {
    let settings = ProbeSettings::for_request(request.max_time_ms(), request.max_redirects());
    let session = handle.configure(settings);

    let start = Instant::now();
    let outcome = session.probe(request.url()).await;
    let duration_ms = elapsed_ms(start);

    drop(session);

    debug!(
        "Probed {} in {} ms: {:?}",
        request.url(),
        duration_ms,
        outcome
    );
    classify(outcome, duration_ms)
}

/// Turns a probe outcome into a result.
///
/// Hitting the redirect ceiling is not a failure. When the probe succeeded,
/// a pending redirect target wins over the effective URL, because it means
/// the chain may continue.
pub(crate) fn classify(outcome: ProbeOutcome, duration_ms: u64) -> ResolutionResult {
    match outcome.code {
        TransportCode::Ok | TransportCode::TooManyRedirects => {}
        code => {
            warn!("Probe failed: {}", code);
            return ResolutionResult::failure(code, duration_ms);
        }
    }

    if let Some(target) = outcome.info.redirect_url {
        return ResolutionResult::Success {
            expanded_url: target,
            reached_redirect_limit: true,
            duration_ms,
        };
    }

    if let Some(effective) = outcome.info.effective_url {
        return ResolutionResult::Success {
            expanded_url: effective,
            reached_redirect_limit: false,
            duration_ms,
        };
    }

    error!(
        "Probe finished with {:?} but reported neither a redirect target nor an effective URL",
        outcome.code
    );
    ResolutionResult::failure(TransportCode::FailedInit, duration_ms)
}
