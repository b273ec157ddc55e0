//! Configuration constants.
//!
//! Built-in defaults for the resolver and the names of the environment
//! variables that override them at startup.

/// Maximum number of idle connections kept per host.
/// Directly correlated with memory usage; larger values amortize TLS setup
/// across more destinations.
pub const DEFAULT_MAX_CONNECTIONS: usize = 500;

/// Redirect ceiling used when a request does not carry `max_redirects`.
pub const DEFAULT_MAX_REDIRECTS: u32 = 5;

/// Total time budget in milliseconds used when a request does not carry
/// `max_time_ms`.
///
/// The budget is best-effort: DNS resolution beneath the HTTP client may
/// overrun it, so callers must still enforce their own deadline.
pub const DEFAULT_MAX_TIME_MS: u64 = 500;

/// Environment variable overriding [`DEFAULT_MAX_CONNECTIONS`].
pub const ENV_MAX_CONNECTIONS: &str = "MAX_CONNECTIONS";
/// Environment variable overriding [`DEFAULT_MAX_REDIRECTS`].
pub const ENV_DEFAULT_MAX_REDIRECTS: &str = "DEFAULT_MAX_REDIRECTS";
/// Environment variable overriding [`DEFAULT_MAX_TIME_MS`].
pub const ENV_DEFAULT_MAX_TIME_MS: &str = "DEFAULT_MAX_TIME_MS";

/// Set by the Lambda execution environment; its presence selects the
/// managed-runtime entry point instead of the local stdin loop.
pub const ENV_LAMBDA_FUNCTION_NAME: &str = "AWS_LAMBDA_FUNCTION_NAME";

/// User-Agent sent with every probe.
pub const USER_AGENT: &str = concat!("url_expander/", env!("CARGO_PKG_VERSION"));

/// Scheme assumed for inputs that do not carry one (`a.co/x`).
pub const DEFAULT_SCHEME: &str = "http";
