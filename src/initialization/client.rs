//! HTTP client initialization.
//!
//! Two clients are built once at startup and shared by every audit:
//! - the page client, used for the primary fetch, follows redirects
//! - the probe client, used for link liveness checks, does not

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{Config, TCP_CONNECT_TIMEOUT_SECS};

/// Initializes the HTTP client used to fetch the audited page.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the config
/// - Overall timeout of `timeout_seconds`
/// - TCP connect timeout of `TCP_CONNECT_TIMEOUT_SECS`
/// - Redirect following enabled (reqwest default, up to 10 hops)
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .timeout(config.fetch_timeout())
        .connect_timeout(Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}

/// Initializes the HTTP client used for link probes.
///
/// Redirects are disabled: a probe only counts as reachable when the link
/// itself answers 200, so a 3xx response must be observed rather than followed.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_probe_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let connect_timeout = Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS).min(config.probe_timeout());
    let client = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(config.probe_timeout())
        .connect_timeout(connect_timeout)
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}
