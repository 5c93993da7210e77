//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::audit::ScorePolicy;
use crate::config::constants::{
    DEFAULT_BIND_ADDRESS, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_MAX_LINK_CONCURRENCY,
    DEFAULT_PORT, DEFAULT_PROBE_TIMEOUT_SECS, DEFAULT_USER_AGENT, MAX_LINK_CONCURRENCY_LIMIT,
    MAX_PROBE_RETRIES,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
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
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Service configuration.
///
/// Parsed from the command line (every flag can also be set through a
/// `PAGE_AUDIT_*` environment variable), or constructed programmatically.
///
/// # Examples
///
/// ```no_run
/// use page_audit::Config;
///
/// let config = Config {
///     port: 8080,
///     max_link_concurrency: 4,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Parser)]
#[command(name = "page_audit", version, about)]
pub struct Config {
    /// Address to bind the HTTP server to
    #[arg(long, env = "PAGE_AUDIT_BIND", default_value = DEFAULT_BIND_ADDRESS)]
    pub bind: String,

    /// Port to listen on
    #[arg(long, env = "PAGE_AUDIT_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Log level
    #[arg(long, value_enum, env = "PAGE_AUDIT_LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, env = "PAGE_AUDIT_LOG_FORMAT", default_value = "plain")]
    pub log_format: LogFormat,

    /// Timeout for fetching the audited page, in seconds
    #[arg(long, env = "PAGE_AUDIT_TIMEOUT_SECONDS", default_value_t = DEFAULT_FETCH_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Timeout for a single link probe, in seconds
    #[arg(long, env = "PAGE_AUDIT_PROBE_TIMEOUT_SECONDS", default_value_t = DEFAULT_PROBE_TIMEOUT_SECS)]
    pub probe_timeout_seconds: u64,

    /// Maximum number of link probes in flight per audit
    #[arg(long, env = "PAGE_AUDIT_MAX_LINK_CONCURRENCY", default_value_t = DEFAULT_MAX_LINK_CONCURRENCY)]
    pub max_link_concurrency: usize,

    /// Retries for a link probe that timed out or failed to connect
    #[arg(long, env = "PAGE_AUDIT_PROBE_RETRIES", default_value_t = 0)]
    pub probe_retries: usize,

    /// HTTP User-Agent header value
    #[arg(long, env = "PAGE_AUDIT_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Clamp scores at zero instead of letting deductions drive them negative
    #[arg(long, env = "PAGE_AUDIT_CLAMP_SCORE")]
    pub clamp_score: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            timeout_seconds: DEFAULT_FETCH_TIMEOUT_SECS,
            probe_timeout_seconds: DEFAULT_PROBE_TIMEOUT_SECS,
            max_link_concurrency: DEFAULT_MAX_LINK_CONCURRENCY,
            probe_retries: 0,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            clamp_score: false,
        }
    }
}

/// A configuration value that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for `{field}`: {message}")]
pub struct ConfigValidationError {
    /// Name of the offending field
    pub field: &'static str,
    /// What is wrong and what is accepted
    pub message: String,
}

impl ConfigValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl Config {
    /// Checks that every value is usable before any resource is created.
    ///
    /// # Errors
    ///
    /// Returns the first field that is out of range.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.timeout_seconds == 0 {
            return Err(ConfigValidationError::new(
                "timeout_seconds",
                "must be greater than 0",
            ));
        }
        if self.probe_timeout_seconds == 0 {
            return Err(ConfigValidationError::new(
                "probe_timeout_seconds",
                "must be greater than 0",
            ));
        }
        if self.max_link_concurrency == 0 || self.max_link_concurrency > MAX_LINK_CONCURRENCY_LIMIT
        {
            return Err(ConfigValidationError::new(
                "max_link_concurrency",
                format!(
                    "must be between 1 and {MAX_LINK_CONCURRENCY_LIMIT} to avoid overwhelming target hosts"
                ),
            ));
        }
        if self.probe_retries > MAX_PROBE_RETRIES {
            return Err(ConfigValidationError::new(
                "probe_retries",
                format!("must be at most {MAX_PROBE_RETRIES}"),
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigValidationError::new(
                "user_agent",
                "must not be empty",
            ));
        }
        Ok(())
    }

    /// Timeout applied to the primary page fetch.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Timeout applied to each link probe attempt.
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_seconds)
    }

    /// Score policy selected by `--clamp-score`.
    pub fn score_policy(&self) -> ScorePolicy {
        if self.clamp_score {
            ScorePolicy::ClampAtZero
        } else {
            ScorePolicy::Unclamped
        }
    }
}
