//! Resolution request and result types.

use crate::error_handling::{RequestError, TransportCode};

/// One resolution call's input.
///
/// Limits are already filled in from configuration defaults; an empty URL is
/// rejected at construction so the resolver never sees one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    url: String,
    max_time_ms: u64,
    max_redirects: u32,
}

impl ResolutionRequest {
    /// Creates a request.
    ///
    /// # Errors
    ///
    /// Returns `RequestError::MissingUrl` if `url` is empty or blank.
    pub fn new(
        url: impl Into<String>,
        max_time_ms: u64,
        max_redirects: u32,
    ) -> Result<Self, RequestError> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(RequestError::MissingUrl);
        }
        Ok(Self {
            url,
            max_time_ms,
            max_redirects,
        })
    }

    /// URL to resolve, exactly as supplied.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Total time budget in milliseconds (0 = unbounded).
    pub fn max_time_ms(&self) -> u64 {
        self.max_time_ms
    }

    /// Redirect ceiling (0 = report the first hop only).
    pub fn max_redirects(&self) -> u32 {
        self.max_redirects
    }
}

/// Outcome of one resolution call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionResult {
    /// The chain was resolved, completely or up to the ceiling.
    Success {
        /// Terminal URL, or the pending target when the ceiling was hit
        expanded_url: String,
        /// `true` when further hops may exist beyond `expanded_url`
        reached_redirect_limit: bool,
        /// Time spent probing, in milliseconds
        duration_ms: u64,
    },
    /// The probe failed.
    Failure {
        /// Transport code, passed through unchanged
        error_code: TransportCode,
        /// Canonical description of `error_code`
        error_message: String,
        /// Time spent probing, in milliseconds
        duration_ms: u64,
    },
}

impl ResolutionResult {
    /// Builds a `Failure` whose message is the code's canonical description.
    pub fn failure(error_code: TransportCode, duration_ms: u64) -> Self {
        ResolutionResult::Failure {
            error_code,
            error_message: error_code.description().to_string(),
            duration_ms,
        }
    }

    /// Time spent probing, present on both variants.
    pub fn duration_ms(&self) -> u64 {
        match self {
            ResolutionResult::Success { duration_ms, .. }
            | ResolutionResult::Failure { duration_ms, .. } => *duration_ms,
        }
    }

    /// Code reported on the wire: `Ok` for every success, including a
    /// reached redirect limit.
    pub fn error_code(&self) -> TransportCode {
        match self {
            ResolutionResult::Success { .. } => TransportCode::Ok,
            ResolutionResult::Failure { error_code, .. } => *error_code,
        }
    }

    /// Whether this is a `Success`.
    pub fn is_success(&self) -> bool {
        self.error_code().is_ok()
    }
}
