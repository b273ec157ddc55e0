//! Shared HTTP client state.
//!
//! One `ClientHandle` is created at startup and reused for every resolution
//! so that pooled connections and TLS sessions carry over between calls.
//! Per-call overrides are applied through [`ClientHandle::configure`], which
//! returns a [`ProbeSession`] guard; dropping the guard restores the
//! baseline settings, so no call can inherit another call's redirect
//! following.

use std::time::Duration;

use log::debug;
use reqwest::redirect::Policy;

use crate::config::{Config, USER_AGENT};
use crate::error_handling::InitializationError;

use super::probe::{self, ProbeOutcome};

/// Converts a millisecond budget into an optional timeout. Zero disables it.
pub(crate) fn budget(max_time_ms: u64) -> Option<Duration> {
    (max_time_ms > 0).then(|| Duration::from_millis(max_time_ms))
}

/// Options that vary from one probe to the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeSettings {
    timeout: Option<Duration>,
    follow_location: bool,
    max_redirects: Option<u32>,
}

impl ProbeSettings {
    /// Settings a handle holds between calls: the configured default budget,
    /// redirect following disabled, unbounded ceiling.
    pub fn baseline(config: &Config) -> Self {
        Self {
            timeout: budget(config.default_max_time_ms),
            follow_location: false,
            max_redirects: None,
        }
    }

    /// Settings for one request.
    ///
    /// A ceiling of zero leaves following disabled, so only the first hop is
    /// reported.
    pub fn for_request(max_time_ms: u64, max_redirects: u32) -> Self {
        let follow_location = max_redirects > 0;
        Self {
            timeout: budget(max_time_ms),
            follow_location,
            max_redirects: follow_location.then_some(max_redirects),
        }
    }

    /// Total time budget across all hops, `None` when unbounded.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Whether redirects are followed automatically.
    pub fn follow_location(&self) -> bool {
        self.follow_location
    }

    /// Redirect ceiling, `None` meaning unbounded.
    pub fn max_redirects(&self) -> Option<u32> {
        self.max_redirects
    }
}

/// Long-lived transport handle.
///
/// Not safe for concurrent use: `configure` takes `&mut self`, and callers
/// that share a handle across tasks must serialize access behind a lock.
#[derive(Debug)]
pub struct ClientHandle {
    client: reqwest::Client,
    baseline: ProbeSettings,
    current: ProbeSettings,
}

impl ClientHandle {
    /// Builds the shared client.
    ///
    /// Creates a `reqwest::Client` configured with:
    /// - Automatic redirects disabled (hops are followed by the probe so the
    ///   next target stays observable when the ceiling is hit)
    /// - Certificate validation disabled, which with rustls also skips
    ///   hostname checks; misconfigured shorteners still resolve
    /// - An idle pool of `config.max_connections` connections per host
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the client cannot be
    /// built. The process cannot continue in that case.
    pub fn new(config: &Config) -> Result<Self, InitializationError> {
        let client = reqwest::Client::builder()
            .redirect(Policy::none())
            .danger_accept_invalid_certs(true)
            .pool_max_idle_per_host(config.max_connections)
            .user_agent(USER_AGENT)
            .build()?;

        let baseline = ProbeSettings::baseline(config);
        debug!(
            "HTTP client ready (max_connections={}, baseline={:?})",
            config.max_connections, baseline
        );
        Ok(Self {
            client,
            current: baseline.clone(),
            baseline,
        })
    }

    /// Settings the next probe would use.
    pub fn settings(&self) -> &ProbeSettings {
        &self.current
    }

    /// Settings restored after every call.
    pub fn baseline(&self) -> &ProbeSettings {
        &self.baseline
    }

    /// Applies per-call overrides.
    ///
    /// The returned session reverts them when dropped, whichever way the
    /// call ends.
    pub fn configure(&mut self, settings: ProbeSettings) -> ProbeSession<'_> {
        self.current = settings;
        ProbeSession { handle: self }
    }
}

/// A handle with per-call overrides applied.
#[derive(Debug)]
pub struct ProbeSession<'a> {
    handle: &'a mut ClientHandle,
}

impl ProbeSession<'_> {
    /// Settings in force for this session.
    pub fn settings(&self) -> &ProbeSettings {
        &self.handle.current
    }

    /// Issues the bounded HEAD probe for `url`.
    pub async fn probe(&self, url: &str) -> ProbeOutcome {
        probe::run(&self.handle.client, &self.handle.current, url).await
    }
}

impl Drop for ProbeSession<'_> {
    fn drop(&mut self) {
        self.handle.current = self.handle.baseline.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_zero_is_unbounded() {
        assert_eq!(budget(0), None);
        assert_eq!(budget(250), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_for_request_zero_redirects_disables_following() {
        let settings = ProbeSettings::for_request(1000, 0);
        assert!(!settings.follow_location());
        assert_eq!(settings.max_redirects(), None);
        assert_eq!(settings.timeout(), Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_for_request_positive_redirects_enables_following() {
        let settings = ProbeSettings::for_request(500, 3);
        assert!(settings.follow_location());
        assert_eq!(settings.max_redirects(), Some(3));
    }

    #[test]
    fn test_baseline_uses_default_budget() {
        let config = Config {
            default_max_time_ms: 750,
            ..Default::default()
        };
        let baseline = ProbeSettings::baseline(&config);
        assert_eq!(baseline.timeout(), Some(Duration::from_millis(750)));
        assert!(!baseline.follow_location());
        assert_eq!(baseline.max_redirects(), None);
    }

    #[test]
    fn test_session_drop_restores_baseline() {
        let mut handle = ClientHandle::new(&Config::default()).expect("client should build");
        {
            let session = handle.configure(ProbeSettings::for_request(2000, 10));
            assert!(session.settings().follow_location());
            assert_eq!(session.settings().max_redirects(), Some(10));
        }
        assert_eq!(handle.settings(), handle.baseline());
        assert!(!handle.settings().follow_location());
    }

    #[test]
    fn test_session_drop_restores_after_panic() {
        let mut handle = ClientHandle::new(&Config::default()).expect("client should build");
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _session = handle.configure(ProbeSettings::for_request(2000, 7));
            panic!("probe blew up");
        }));
        assert!(result.is_err());
        assert_eq!(handle.settings(), handle.baseline());
    }
}
