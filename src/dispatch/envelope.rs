//! JSON request and response envelopes.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error_handling::RequestError;
use crate::resolve::{ResolutionRequest, ResolutionResult};

/// Incoming request payload.
///
/// Unknown keys are ignored. Limits must be non-negative integers; anything
/// else fails deserialization and rejects the whole envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestEnvelope {
    /// URL to resolve (required)
    pub url: Option<String>,
    /// Total time budget in milliseconds
    pub max_time_ms: Option<u64>,
    /// Redirect ceiling
    pub max_redirects: Option<u32>,
}

impl RequestEnvelope {
    /// Decodes an envelope from an already-parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, RequestError> {
        serde_json::from_value(value).map_err(|e| RequestError::InvalidJson(e.to_string()))
    }

    /// Decodes an envelope from raw JSON text.
    pub fn from_json(payload: &str) -> Result<Self, RequestError> {
        serde_json::from_str(payload).map_err(|e| RequestError::InvalidJson(e.to_string()))
    }

    /// Fills omitted limits from `config` and validates the URL.
    pub fn into_request(self, config: &Config) -> Result<ResolutionRequest, RequestError> {
        let url = self.url.ok_or(RequestError::MissingUrl)?;
        ResolutionRequest::new(
            url,
            self.max_time_ms.unwrap_or(config.default_max_time_ms),
            self.max_redirects.unwrap_or(config.default_max_redirects),
        )
    }
}

/// Outgoing response payload.
///
/// `error_code` and `duration_ms` are always present. `expanded_url` and
/// `reached_redirect_limit` appear only on success, `error_message` only on
/// failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// 0 on success (including a reached redirect limit), else the transport code
    pub error_code: u32,
    /// Time spent probing, in milliseconds
    pub duration_ms: u64,
    /// Resolved URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded_url: Option<String>,
    /// Whether further hops may exist beyond `expanded_url`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reached_redirect_limit: Option<bool>,
    /// Canonical description of `error_code`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl From<ResolutionResult> for ResponseEnvelope {
    fn from(result: ResolutionResult) -> Self {
        match result {
            ResolutionResult::Success {
                expanded_url,
                reached_redirect_limit,
                duration_ms,
            } => Self {
                error_code: 0,
                duration_ms,
                expanded_url: Some(expanded_url),
                reached_redirect_limit: Some(reached_redirect_limit),
                error_message: None,
            },
            ResolutionResult::Failure {
                error_code,
                error_message,
                duration_ms,
            } => Self {
                error_code: error_code.code(),
                duration_ms,
                expanded_url: None,
                reached_redirect_limit: None,
                error_message: Some(error_message),
            },
        }
    }
}
