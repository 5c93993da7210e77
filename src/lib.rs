//! page_audit library: single-page SEO and security-header audits
//!
//! This library audits one web page at a time and scores it from 100 down:
//! - SEO: 18 checks over the parsed HTML, including a concurrent liveness
//!   check of every absolute link on the page
//! - Security: 15 checks over the HTTP response headers
//!
//! Each audit returns its own score and an ordered list of issues. The same
//! audits are served over HTTP by [`run_server`].
//!
//! # Example
//!
//! ```no_run
//! use page_audit::{AuditContext, Config};
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let audits = AuditContext::new(&Config::default(), CancellationToken::new())?;
//! let report = audits.audit_security(Some("https://example.com")).await?;
//! println!("{} scored {} ({} issues)", report.url, report.score, report.issues.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

mod app;
pub mod audit;
pub mod config;
mod error_handling;
mod fetch;
pub mod initialization;
mod parse;
pub mod server;
mod utils;

// Re-export public API
pub use app::{validate_audit_url, AuditTarget};
pub use audit::{AuditContext, AuditReport, Issue, LinkSummary, ScorePolicy};
pub use config::{Config, ConfigValidationError, LogFormat, LogLevel};
pub use error_handling::{AuditError, FetchFailure, InitializationError};
pub use fetch::HeaderSet;
pub use parse::{Anchor, EmbeddedElement, LinkTag, MetaTag, PageModel, Script};

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;

/// Validates `config` and runs the audit server until shutdown.
///
/// Shutdown is triggered by Ctrl-C or SIGTERM; outstanding link checks are
/// cancelled and in-flight requests drain before this returns.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the HTTP clients cannot
/// be built, or the listener cannot be bound.
pub async fn run_server(config: Config) -> Result<()> {
    config.validate().context("Invalid configuration")?;
    let cancel = CancellationToken::new();
    server::start_server(&config, cancel).await
}
