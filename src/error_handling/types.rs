//! Error type definitions.
//!
//! This module defines the error types used at the process and request
//! boundaries, and the numeric transport taxonomy reported to callers.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
///
/// Any of these is fatal: the process cannot serve requests without a logger
/// or an HTTP client.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Rejection of a request before it reaches the resolver.
///
/// These never carry an `error_code`: the dispatch layer reports them through
/// whatever failure channel the hosting runtime offers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// The payload is not a JSON object of the expected shape.
    #[error("Failed to parse input JSON: {0}")]
    InvalidJson(String),

    /// The `url` key is absent or empty.
    #[error("Missing URL argument")]
    MissingUrl,

    /// A line in local mode carries a limit that is not a non-negative integer.
    #[error("Invalid {field} value {value:?}: expected a non-negative integer")]
    InvalidLimit {
        /// Name of the offending field
        field: &'static str,
        /// The raw text that failed to parse
        value: String,
    },
}

impl RequestError {
    /// Short machine-readable category, used as the Lambda `errorType`.
    pub fn kind(&self) -> &'static str {
        match self {
            RequestError::InvalidJson(_) | RequestError::MissingUrl => "InvalidJSON",
            RequestError::InvalidLimit { .. } => "InvalidArgument",
        }
    }
}

/// Outcome codes of a transport probe.
///
/// Discriminants are the libcurl `CURLcode` values, so the integers on the
/// wire keep their published meaning for callers that interpret them. Only
/// the codes this transport can actually produce are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
#[allow(missing_docs)]
#[repr(u32)]
pub enum TransportCode {
    Ok = 0,
    UnsupportedProtocol = 1,
    FailedInit = 2,
    UrlMalformat = 3,
    CouldntResolveProxy = 5,
    CouldntResolveHost = 6,
    CouldntConnect = 7,
    WeirdServerReply = 8,
    Http2 = 16,
    OutOfMemory = 27,
    OperationTimedout = 28,
    SslConnectError = 35,
    BadFunctionArgument = 43,
    TooManyRedirects = 47,
    GotNothing = 52,
    SendError = 55,
    RecvError = 56,
    PeerFailedVerification = 60,
    BadContentEncoding = 61,
}

impl TransportCode {
    /// Numeric value as reported in `error_code`.
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Looks a code up by its numeric value.
    pub fn from_code(code: u32) -> Option<Self> {
        use strum::IntoEnumIterator;
        Self::iter().find(|c| c.code() == code)
    }

    /// Canonical human-readable description, identical to libcurl's
    /// `curl_easy_strerror` text for the same code.
    pub fn description(self) -> &'static str {
        match self {
            TransportCode::Ok => "No error",
            TransportCode::UnsupportedProtocol => "Unsupported protocol",
            TransportCode::FailedInit => "Failed initialization",
            TransportCode::UrlMalformat => "URL using bad/illegal format or missing URL",
            TransportCode::CouldntResolveProxy => "Could not resolve proxy name",
            TransportCode::CouldntResolveHost => "Could not resolve host name",
            TransportCode::CouldntConnect => "Could not connect to server",
            TransportCode::WeirdServerReply => "Weird server reply",
            TransportCode::Http2 => "Error in the HTTP2 framing layer",
            TransportCode::OutOfMemory => "Out of memory",
            TransportCode::OperationTimedout => "Timeout was reached",
            TransportCode::SslConnectError => "SSL connect error",
            TransportCode::BadFunctionArgument => "A libcurl function was given a bad argument",
            TransportCode::TooManyRedirects => "Number of redirects hit maximum amount",
            TransportCode::GotNothing => "Server returned nothing (no headers, no data)",
            TransportCode::SendError => "Failed sending data to the peer",
            TransportCode::RecvError => "Failure when receiving data from the peer",
            TransportCode::PeerFailedVerification => {
                "SSL peer certificate or SSH remote key was not OK"
            }
            TransportCode::BadContentEncoding => {
                "Unrecognized or bad HTTP Content or Transfer-Encoding"
            }
        }
    }

    /// `true` only for [`TransportCode::Ok`].
    pub fn is_ok(self) -> bool {
        self == TransportCode::Ok
    }
}

impl std::fmt::Display for TransportCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.code(), self.description())
    }
}
