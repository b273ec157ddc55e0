//! Logger initialization.
//!
//! Diagnostics go to stderr through `env_logger`. Result lines printed by the
//! local front end never pass through the logger.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::{Level, LevelFilter};

/// Renders one record as a single-line JSON object.
fn json_line(timestamp_ms: i64, level: Level, target: &str, message: &str) -> String {
    format!(
        "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
        timestamp_ms,
        level,
        target,
        serde_json::to_string(message).unwrap_or_else(|_| "\"\"".into())
    )
}

fn level_marker(level: Level) -> ColoredString {
    let label = level.to_string();
    match level {
        Level::Error => label.red(),
        Level::Warn => label.yellow(),
        Level::Info => label.green(),
        Level::Debug => label.blue(),
        Level::Trace => label.purple(),
    }
}

/// Initializes the logger with the specified level and format.
///
/// `RUST_LOG` is read first and `level` then overrides it, so
/// `RUST_LOG=url_expander=trace` only takes effect together with a matching
/// `--log-level`. The HTTP stack is capped at `info`.
///
/// Colors are only forced in plain format when stderr is a terminal; Lambda
/// captures stderr into its log stream, where escape codes are noise.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Debug output while resolving a list of links
/// url_expander --log-level debug < links.txt
///
/// # Structured logs for ingestion
/// url_expander --log-format json < links.txt
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("hyper_util", LevelFilter::Info);
    builder.filter_module("rustls", LevelFilter::Warn);
    builder.filter_module("url_expander", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{}",
                    json_line(
                        chrono::Utc::now().timestamp_millis(),
                        record.level(),
                        record.target(),
                        &record.args().to_string(),
                    )
                )
            });
        }
        LogFormat::Plain => {
            if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
                colored::control::set_override(true);
            }
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{} {} [{}] {}",
                    chrono::Local::now().format("%H:%M:%S%.3f"),
                    record.target().cyan(),
                    level_marker(record.level()),
                    record.args()
                )
            });
        }
    }

    // try_init so a second call (tests, embedding) reports instead of panicking
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}
