//! Bounded HEAD probe.
//!
//! Follows the redirect chain hop by hop with automatic redirects disabled on
//! the client, so that when the ceiling stops the walk the target of the
//! redirect that was *not* followed is still known.

use std::borrow::Cow;
use std::time::{Duration, Instant};

use log::debug;
use reqwest::header::LOCATION;
use reqwest::Response;
use url::Url;

use crate::config::DEFAULT_SCHEME;
use crate::error_handling::{categorize_reqwest_error, error_chain_text, TransportCode};

use super::client::ProbeSettings;

/// Transport introspection for one finished probe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferInfo {
    /// Last URL actually requested.
    pub effective_url: Option<String>,
    /// Redirect target seen but not followed, either because following was
    /// disabled or because the ceiling was reached.
    pub redirect_url: Option<String>,
}

/// Raw result of a probe, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// Transport status. `TooManyRedirects` still carries usable `info`.
    pub code: TransportCode,
    /// What the transport knows about the URLs involved.
    pub info: TransferInfo,
}

impl ProbeOutcome {
    fn new(code: TransportCode, effective: Option<&Url>, pending: Option<Url>) -> Self {
        Self {
            code,
            info: TransferInfo {
                effective_url: effective.map(Url::to_string),
                redirect_url: pending.map(String::from),
            },
        }
    }
}

/// Parses user input into a probe URL.
///
/// Input without a scheme separator is assumed to be `http`. Only `http` and
/// `https` can be probed.
pub(crate) fn normalize_url(raw: &str) -> Result<Url, TransportCode> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TransportCode::UrlMalformat);
    }
    let candidate = if trimmed.contains("://") {
        Cow::Borrowed(trimmed)
    } else {
        Cow::Owned(format!("{}://{}", DEFAULT_SCHEME, trimmed))
    };
    let url = Url::parse(&candidate).map_err(|_| TransportCode::UrlMalformat)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(TransportCode::UnsupportedProtocol),
    }
}

/// Returns the absolute target of `response` if it is a followable redirect.
///
/// A redirect is any 3xx other than 304 carrying a `Location` that resolves
/// against `current`.
fn redirect_target(current: &Url, response: &Response) -> Option<Url> {
    let status = response.status();
    if !status.is_redirection() || status == reqwest::StatusCode::NOT_MODIFIED {
        return None;
    }
    let location = response.headers().get(LOCATION)?;
    // Shorteners send raw UTF-8 for Unicode paths; `join` percent-encodes it
    let location = match std::str::from_utf8(location.as_bytes()) {
        Ok(value) => value,
        Err(_) => {
            debug!("Ignoring non-UTF-8 Location header from {}", current);
            return None;
        }
    };
    match current.join(location) {
        Ok(target) => Some(target),
        Err(e) => {
            debug!(
                "Ignoring unresolvable Location {:?} from {}: {}",
                location, current, e
            );
            None
        }
    }
}

/// Time left before `deadline` for the next hop.
///
/// `Ok(None)` when there is no deadline. A spent budget is reported as
/// `OperationTimedout` before another request goes out.
fn hop_budget(deadline: Option<Instant>, now: Instant) -> Result<Option<Duration>, TransportCode> {
    let Some(deadline) = deadline else {
        return Ok(None);
    };
    let remaining = deadline.saturating_duration_since(now);
    if remaining.is_zero() {
        return Err(TransportCode::OperationTimedout);
    }
    Ok(Some(remaining))
}

/// Runs one probe under `settings`.
pub(crate) async fn run(client: &reqwest::Client, settings: &ProbeSettings, raw_url: &str) -> ProbeOutcome {
    let mut current = match normalize_url(raw_url) {
        Ok(url) => url,
        Err(code) => {
            debug!("Rejected URL {:?}: {}", raw_url, code);
            return ProbeOutcome::new(code, None, None);
        }
    };

    let deadline = settings.timeout().map(|budget| Instant::now() + budget);
    let mut followed: u32 = 0;

    loop {
        let mut request = client.head(current.clone());
        match hop_budget(deadline, Instant::now()) {
            Ok(Some(remaining)) => request = request.timeout(remaining),
            Ok(None) => {}
            Err(code) => {
                debug!("Budget spent before HEAD {}", current);
                return ProbeOutcome::new(code, Some(&current), None);
            }
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                let code = categorize_reqwest_error(&e);
                debug!("HEAD {} failed ({}): {}", current, code, error_chain_text(&e));
                return ProbeOutcome::new(code, Some(&current), None);
            }
        };

        let target = redirect_target(&current, &response);
        debug!("HEAD {} -> {}", current, response.status());
        drop(response);

        let Some(target) = target else {
            return ProbeOutcome::new(TransportCode::Ok, Some(&current), None);
        };

        if !settings.follow_location() {
            return ProbeOutcome::new(TransportCode::Ok, Some(&current), Some(target));
        }
        if settings.max_redirects().is_some_and(|max| followed >= max) {
            return ProbeOutcome::new(TransportCode::TooManyRedirects, Some(&current), Some(target));
        }

        followed += 1;
        current = target;
    }
}
