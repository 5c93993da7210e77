//! Page audits.
//!
//! An audit validates the submitted URL, fetches the page once and runs one of
//! two independent rule engines over the result:
//! - [`seo`]: 18 rules over the parsed page, including a concurrent link check
//! - [`security`]: 15 rules over the response headers
//!
//! Both produce an [`AuditReport`] scored from 100 down.

pub mod links;
pub mod report;
pub mod security;
pub mod seo;

use std::sync::Arc;
use std::time::Instant;

use log::{debug, info};
use tokio_util::sync::CancellationToken;

use crate::app::validate_audit_url;
use crate::config::Config;
use crate::error_handling::{AuditError, InitializationError};
use crate::fetch::{fetch_headers, fetch_page};
use crate::initialization::{init_client, init_probe_client};
use crate::parse::PageModel;

pub use links::{
    is_probe_candidate, probe_link, validate_links, LinkCheckOptions, LinkCheckResult,
    LinkSummary,
};
pub use report::{assemble, AuditReport, Finding, Issue, ScorePolicy};
pub use security::{evaluate_security, HeaderRule, Polarity, SECURITY_RULES};
pub use seo::{count_internal_links, evaluate_seo, SeoCheck, SeoInput, SeoRule, SEO_RULES};

/// Shared resources for running audits.
///
/// Cheap to clone: clients are reference-counted and the cancellation token
/// is shared, so every request handler can hold its own copy.
#[derive(Clone)]
pub struct AuditContext {
    /// Client for the audited page (follows redirects)
    pub client: Arc<reqwest::Client>,
    /// Client for link probes (does not follow redirects)
    pub probe_client: Arc<reqwest::Client>,
    pub link_options: LinkCheckOptions,
    pub score_policy: ScorePolicy,
    /// Cancelled on shutdown; aborts outstanding link probes
    pub cancel: CancellationToken,
}

impl AuditContext {
    /// Creates a context with its own HTTP clients built from `config`.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if a client cannot be built.
    pub fn new(config: &Config, cancel: CancellationToken) -> Result<Self, InitializationError> {
        Ok(Self::with_clients(
            init_client(config)?,
            init_probe_client(config)?,
            config,
            cancel,
        ))
    }

    /// Creates a context around existing clients.
    pub fn with_clients(
        client: Arc<reqwest::Client>,
        probe_client: Arc<reqwest::Client>,
        config: &Config,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            client,
            probe_client,
            link_options: LinkCheckOptions::from(config),
            score_policy: config.score_policy(),
            cancel,
        }
    }

    /// Runs the SEO audit for `url`.
    ///
    /// # Errors
    ///
    /// - `AuditError::MissingUrl` / `AuditError::InvalidUrl` for bad input
    /// - `AuditError::Fetch` / `AuditError::BodyTooLarge` if the page cannot be fetched
    /// - `AuditError::Cancelled` if shutdown interrupts the link check
    pub async fn audit_seo(&self, url: Option<&str>) -> Result<AuditReport, AuditError> {
        let start = Instant::now();
        let target = validate_audit_url(url)?;
        let fetched = fetch_page(&self.client, &target).await?;
        let page = PageModel::parse(&fetched.body);

        let links = validate_links(
            &self.probe_client,
            &page.anchors,
            &self.link_options,
            &self.cancel,
        )
        .await
        .ok_or_else(|| AuditError::Cancelled {
            url: target.as_str().to_string(),
        })?;
        debug!(
            "Link check for {}: {} probed, {} broken, {} skipped",
            target.as_str(),
            links.probed,
            links.broken,
            links.skipped
        );

        let report = evaluate_seo(
            &SeoInput {
                page: &page,
                target: &target,
                links: &links,
            },
            self.score_policy,
        );
        info!(
            "SEO audit of {}: score {} ({} issues) in {:.2}s",
            report.url,
            report.score,
            report.issues.len(),
            start.elapsed().as_secs_f64()
        );
        Ok(report)
    }

    /// Runs the security header audit for `url`.
    ///
    /// # Errors
    ///
    /// - `AuditError::MissingUrl` / `AuditError::InvalidUrl` for bad input
    /// - `AuditError::Fetch` if the page cannot be fetched
    pub async fn audit_security(&self, url: Option<&str>) -> Result<AuditReport, AuditError> {
        let start = Instant::now();
        let target = validate_audit_url(url)?;
        let fetched = fetch_headers(&self.client, &target).await?;

        let report = evaluate_security(target.as_str(), &fetched.headers, self.score_policy);
        info!(
            "Security audit of {}: score {} ({} issues) in {:.2}s",
            report.url,
            report.score,
            report.issues.len(),
            start.elapsed().as_secs_f64()
        );
        Ok(report)
    }
}
