//! Local line-oriented mode.
//!
//! Reads one request per line as `url [max_time_ms] [max_redirects]`, resolves
//! it, and prints one line per request: results to stdout, errors to stderr.
//! Blank lines and lines starting with `#` are skipped.

use log::{info, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::config::Config;
use crate::error_handling::RequestError;
use crate::resolve::{resolve, ResolutionRequest, ResolutionResult};
use crate::transport::ClientHandle;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalCommand {
    /// URL to resolve
    pub url: String,
    /// Time budget, if given on the line
    pub max_time_ms: Option<u64>,
    /// Redirect ceiling, if given on the line
    pub max_redirects: Option<u32>,
}

impl LocalCommand {
    /// Fills omitted limits from `config`.
    pub fn into_request(self, config: &Config) -> Result<ResolutionRequest, RequestError> {
        ResolutionRequest::new(
            self.url,
            self.max_time_ms.unwrap_or(config.default_max_time_ms),
            self.max_redirects.unwrap_or(config.default_max_redirects),
        )
    }
}

/// A line of output and the stream it belongs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalLine {
    /// Successful resolution
    Stdout(String),
    /// Failed resolution
    Stderr(String),
}

/// Counters for one local run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalSummary {
    /// Lines that resolved successfully
    pub resolved: usize,
    /// Lines whose probe failed
    pub failed: usize,
    /// Lines rejected before probing
    pub skipped: usize,
}

fn parse_limit<T: std::str::FromStr>(field: &'static str, raw: &str) -> Result<T, RequestError> {
    raw.parse().map_err(|_| RequestError::InvalidLimit {
        field,
        value: raw.to_string(),
    })
}

/// Parses one input line.
///
/// Returns `Ok(None)` for blank and comment lines. Fields past the third are
/// ignored.
///
/// # Errors
///
/// Returns `RequestError::InvalidLimit` if a limit is present but is not a
/// non-negative integer.
pub fn parse_line(line: &str) -> Result<Option<LocalCommand>, RequestError> {
    let mut parts = line.split_whitespace();
    let Some(url) = parts.next() else {
        return Ok(None);
    };
    if url.starts_with('#') {
        return Ok(None);
    }

    let max_time_ms = parts
        .next()
        .map(|raw| parse_limit("max_time_ms", raw))
        .transpose()?;
    let max_redirects = parts
        .next()
        .map(|raw| parse_limit("max_redirects", raw))
        .transpose()?;

    Ok(Some(LocalCommand {
        url: url.to_string(),
        max_time_ms,
        max_redirects,
    }))
}

/// Renders a result the way local mode prints it.
pub fn format_result(url: &str, result: &ResolutionResult) -> LocalLine {
    match result {
        ResolutionResult::Success {
            expanded_url,
            duration_ms,
            ..
        } => LocalLine::Stdout(format!(
            "URL '{}': {} completed in {} ms",
            url, expanded_url, duration_ms
        )),
        ResolutionResult::Failure {
            error_code,
            error_message,
            duration_ms,
        } => LocalLine::Stderr(format!(
            "URL '{}': An error occurred while resolving: {} {}. Error detected in {} ms",
            url,
            error_code.code(),
            error_message,
            duration_ms
        )),
    }
}

/// Resolves every request read from `reader` until end of input.
///
/// # Errors
///
/// Returns an I/O error if reading from `reader` fails. Bad lines are
/// reported and skipped, not returned.
pub async fn run_local<R>(
    handle: &mut ClientHandle,
    config: &Config,
    reader: R,
) -> std::io::Result<LocalSummary>
where
    R: AsyncBufRead + Unpin,
{
    let mut summary = LocalSummary::default();
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let parsed = parse_line(&line)
            .and_then(|command| command.map(|c| c.into_request(config)).transpose());
        let request = match parsed {
            Ok(Some(request)) => request,
            Ok(None) => continue,
            Err(e) => {
                warn!("Skipping line {:?}: {}", line, e);
                eprintln!("Skipping line '{}': {}", line.trim(), e);
                summary.skipped += 1;
                continue;
            }
        };

        let result = resolve(handle, &request).await;
        if result.is_success() {
            summary.resolved += 1;
        } else {
            summary.failed += 1;
        }

        match format_result(request.url(), &result) {
            LocalLine::Stdout(text) => println!("{}", text),
            LocalLine::Stderr(text) => eprintln!("{}", text),
        }
    }

    info!(
        "Local run finished: {} resolved, {} failed, {} skipped",
        summary.resolved, summary.failed, summary.skipped
    );
    Ok(summary)
}
