//! Error categorization.
//!
//! Maps `reqwest` failures onto [`TransportCode`] values. `reqwest` only
//! exposes coarse predicates (`is_timeout`, `is_connect`, ...), so the error
//! source chain text is inspected to tell DNS and TLS failures from refused
//! connections.

use std::error::Error as StdError;

use super::types::TransportCode;

/// Categorizes a `reqwest::Error` into a `TransportCode`.
///
/// # Arguments
///
/// * `error` - The `reqwest::Error` returned by a probe request
///
/// # Returns
///
/// The code callers will see in `error_code`. Never returns
/// [`TransportCode::Ok`].
pub fn categorize_reqwest_error(error: &reqwest::Error) -> TransportCode {
    let chain = error_chain_text(error);

    if error.is_timeout() {
        TransportCode::OperationTimedout
    } else if error.is_builder() {
        if chain.contains("scheme") {
            TransportCode::UnsupportedProtocol
        } else {
            TransportCode::UrlMalformat
        }
    } else if error.is_connect() {
        categorize_connect_failure(&chain)
    } else if error.is_decode() {
        TransportCode::BadContentEncoding
    } else if error.is_body() {
        TransportCode::RecvError
    } else {
        categorize_request_failure(&chain)
    }
}

/// Categorizes a failure that happened while establishing the connection.
///
/// `chain` is the lowercased text of the whole error chain.
pub(crate) fn categorize_connect_failure(chain: &str) -> TransportCode {
    if chain.contains("timed out") || chain.contains("timeout") {
        TransportCode::OperationTimedout
    } else if chain.contains("dns error")
        || chain.contains("failed to lookup address")
        || chain.contains("name or service not known")
        || chain.contains("no such host")
        || chain.contains("nodename nor servname")
        || chain.contains("name resolution")
    {
        if chain.contains("proxy") {
            TransportCode::CouldntResolveProxy
        } else {
            TransportCode::CouldntResolveHost
        }
    } else if chain.contains("certificate") {
        TransportCode::PeerFailedVerification
    } else if chain.contains("tls") || chain.contains("ssl") || chain.contains("handshake") {
        TransportCode::SslConnectError
    } else {
        TransportCode::CouldntConnect
    }
}

/// Categorizes a failure that happened after the connection was up.
pub(crate) fn categorize_request_failure(chain: &str) -> TransportCode {
    if chain.contains("timed out") {
        TransportCode::OperationTimedout
    } else if chain.contains("connection closed before message completed")
        || chain.contains("incomplete message")
        || chain.contains("unexpected eof")
    {
        TransportCode::GotNothing
    } else if chain.contains("http2") || chain.contains("h2 protocol") {
        TransportCode::Http2
    } else if chain.contains("invalid http")
        || chain.contains("invalid status")
        || chain.contains("invalid header")
        || chain.contains("parse")
    {
        TransportCode::WeirdServerReply
    } else if chain.contains("broken pipe") || chain.contains("write") {
        TransportCode::SendError
    } else if chain.contains("tls") || chain.contains("ssl") {
        TransportCode::SslConnectError
    } else {
        TransportCode::RecvError
    }
}

/// Lowercased `Display` text of an error and all of its sources, joined by `": "`.
pub(crate) fn error_chain_text(error: &(dyn StdError + 'static)) -> String {
    let mut parts = vec![error.to_string()];
    let mut source = error.source();
    while let Some(cause) = source {
        parts.push(cause.to_string());
        source = cause.source();
    }
    parts.join(": ").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Wrapped {
        msg: &'static str,
        inner: Option<Box<Wrapped>>,
    }

    impl std::fmt::Display for Wrapped {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.msg)
        }
    }

    impl StdError for Wrapped {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            self.inner.as_deref().map(|e| e as &(dyn StdError + 'static))
        }
    }

    #[test]
    fn test_error_chain_text_walks_sources() {
        let err = Wrapped {
            msg: "error sending request",
            inner: Some(Box::new(Wrapped {
                msg: "client error (Connect)",
                inner: Some(Box::new(Wrapped {
                    msg: "DNS error: failed to lookup address information",
                    inner: None,
                })),
            })),
        };
        let text = error_chain_text(&err);
        assert_eq!(
            text,
            "error sending request: client error (connect): dns error: failed to lookup address information"
        );
    }

    #[test]
    fn test_connect_failure_dns() {
        assert_eq!(
            categorize_connect_failure(
                "error sending request: dns error: failed to lookup address information: name or service not known"
            ),
            TransportCode::CouldntResolveHost
        );
    }

    #[test]
    fn test_connect_failure_refused() {
        assert_eq!(
            categorize_connect_failure(
                "error sending request: tcp connect error: connection refused (os error 111)"
            ),
            TransportCode::CouldntConnect
        );
    }

    #[test]
    fn test_connect_failure_tls() {
        assert_eq!(
            categorize_connect_failure("error sending request: tls handshake eof"),
            TransportCode::SslConnectError
        );
        assert_eq!(
            categorize_connect_failure("invalid peer certificate: unknownissuer"),
            TransportCode::PeerFailedVerification
        );
    }

    #[test]
    fn test_connect_failure_timeout() {
        assert_eq!(
            categorize_connect_failure("tcp connect error: operation timed out"),
            TransportCode::OperationTimedout
        );
    }

    #[test]
    fn test_request_failure_patterns() {
        assert_eq!(
            categorize_request_failure("connection closed before message completed"),
            TransportCode::GotNothing
        );
        assert_eq!(
            categorize_request_failure("received invalid http version"),
            TransportCode::WeirdServerReply
        );
        assert_eq!(
            categorize_request_failure("broken pipe"),
            TransportCode::SendError
        );
        assert_eq!(
            categorize_request_failure("connection reset by peer"),
            TransportCode::RecvError
        );
    }

    // Real reqwest::Error values (refused connections, unresolvable hosts,
    // timeouts) are exercised end to end in tests/redirect_resolution.rs.
}
