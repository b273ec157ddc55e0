//! Configuration types and CLI options.
//!
//! This module defines the library `Config`, the enums used for logging
//! options, and the `clap` option struct used by the binary.

use std::str::FromStr;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_MAX_CONNECTIONS, DEFAULT_MAX_REDIRECTS, DEFAULT_MAX_TIME_MS, ENV_DEFAULT_MAX_REDIRECTS,
    ENV_DEFAULT_MAX_TIME_MS, ENV_MAX_CONNECTIONS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: One JSON object per line, suited to log aggregation
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Process-wide configuration.
///
/// Built once at startup and read-only afterwards. Defaults come from the
/// constants in [`crate::config`]; [`Config::with_env_overrides`] and
/// [`Opt::into_config`] layer the environment and the command line on top.
///
/// # Examples
///
/// ```
/// use url_expander::Config;
///
/// let config = Config {
///     default_max_redirects: 3,
///     ..Default::default()
/// };
/// assert_eq!(config.default_max_time_ms, 500);
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Idle connections kept per host by the shared client
    pub max_connections: usize,

    /// Time budget applied when a request omits `max_time_ms`
    pub default_max_time_ms: u64,

    /// Redirect ceiling applied when a request omits `max_redirects`
    pub default_max_redirects: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            default_max_time_ms: DEFAULT_MAX_TIME_MS,
            default_max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl Config {
    /// Applies environment-style overrides read through `lookup`.
    ///
    /// A variable overrides its constant only when it is present and parses
    /// as a non-negative integer. Anything else is logged and ignored.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = parse_override(&lookup, ENV_MAX_CONNECTIONS) {
            self.max_connections = value;
        }
        if let Some(value) = parse_override(&lookup, ENV_DEFAULT_MAX_TIME_MS) {
            self.default_max_time_ms = value;
        }
        if let Some(value) = parse_override(&lookup, ENV_DEFAULT_MAX_REDIRECTS) {
            self.default_max_redirects = value;
        }
        self
    }
}

fn parse_override<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!(
                "Ignoring {}={:?}: expected a non-negative integer",
                key,
                raw
            );
            None
        }
    }
}

/// Command-line options.
///
/// Every resolver setting is optional on the command line; an absent flag
/// falls back to the environment and then to the built-in constant.
///
/// # Examples
///
/// ```bash
/// # Local mode, reading `url [max_time_ms] [max_redirects]` lines
/// echo "bit.ly/abc 2000 3" | url_expander
///
/// # Raise the default redirect ceiling and log as JSON
/// url_expander --default-max-redirects 10 --log-format json < urls.txt
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "url_expander",
    about = "Resolves URLs to their final destination by following HTTP redirects."
)]
pub struct Opt {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Idle connections kept per host (overrides MAX_CONNECTIONS)
    #[arg(long)]
    pub max_connections: Option<usize>,

    /// Default time budget in milliseconds (overrides DEFAULT_MAX_TIME_MS)
    #[arg(long)]
    pub default_max_time_ms: Option<u64>,

    /// Default redirect ceiling (overrides DEFAULT_MAX_REDIRECTS)
    #[arg(long)]
    pub default_max_redirects: Option<u32>,
}

impl Opt {
    /// Builds the final `Config`: constants, then `lookup`, then CLI flags.
    pub fn into_config<F>(self, lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config {
            log_level: self.log_level,
            log_format: self.log_format,
            ..Default::default()
        }
        .with_env_overrides(lookup);

        if let Some(value) = self.max_connections {
            config.max_connections = value;
        }
        if let Some(value) = self.default_max_time_ms {
            config.default_max_time_ms = value;
        }
        if let Some(value) = self.default_max_redirects {
            config.default_max_redirects = value;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_connections, 500);
        assert_eq!(config.default_max_time_ms, 500);
        assert_eq!(config.default_max_redirects, 5);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.log_format, LogFormat::Plain);
    }

    #[test]
    fn test_env_overrides_apply_when_parseable() {
        let config = Config::default().with_env_overrides(env_of(&[
            ("MAX_CONNECTIONS", "64"),
            ("DEFAULT_MAX_TIME_MS", " 1500 "),
            ("DEFAULT_MAX_REDIRECTS", "0"),
        ]));
        assert_eq!(config.max_connections, 64);
        assert_eq!(config.default_max_time_ms, 1500);
        assert_eq!(config.default_max_redirects, 0);
    }

    #[test]
    fn test_env_overrides_ignore_garbage() {
        let config = Config::default().with_env_overrides(env_of(&[
            ("MAX_CONNECTIONS", "lots"),
            ("DEFAULT_MAX_TIME_MS", "-1"),
            ("DEFAULT_MAX_REDIRECTS", ""),
        ]));
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.default_max_time_ms, DEFAULT_MAX_TIME_MS);
        assert_eq!(config.default_max_redirects, DEFAULT_MAX_REDIRECTS);
    }

    #[test]
    fn test_cli_flags_win_over_env() {
        let opt = Opt::parse_from([
            "url_expander",
            "--default-max-redirects",
            "9",
            "--log-format",
            "json",
        ]);
        let config = opt.into_config(env_of(&[
            ("DEFAULT_MAX_REDIRECTS", "2"),
            ("DEFAULT_MAX_TIME_MS", "750"),
        ]));
        assert_eq!(config.default_max_redirects, 9);
        assert_eq!(config.default_max_time_ms, 750);
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_cli_defaults_without_flags() {
        let opt = Opt::parse_from(["url_expander"]);
        assert_eq!(opt.log_level, LogLevel::Info);
        assert!(opt.max_connections.is_none());
        assert!(opt.default_max_time_ms.is_none());
        assert!(opt.default_max_redirects.is_none());
    }
}
