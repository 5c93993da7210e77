//! Server request and response bodies.

use serde::{Deserialize, Serialize};

use crate::audit::{AuditContext, AuditReport, Issue};

/// Shared state for the audit endpoints
#[derive(Clone)]
pub struct AppState {
    pub audits: AuditContext,
}

/// Body of both audit endpoints.
///
/// `url` is optional so that a missing field reaches the handler and gets the
/// regular validation error instead of a deserialization rejection.
#[derive(Debug, Default, Deserialize)]
pub struct AuditRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// JSON response for `/check-seo`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoResponse {
    pub url: String,
    pub seo_score: i32,
    pub seo_issues: Vec<Issue>,
}

impl From<AuditReport> for SeoResponse {
    fn from(report: AuditReport) -> Self {
        Self {
            url: report.url,
            seo_score: report.score,
            seo_issues: report.issues,
        }
    }
}

/// JSON response for `/check-security`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityResponse {
    pub url: String,
    pub security_score: i32,
    pub issues: Vec<Issue>,
}

impl From<AuditReport> for SecurityResponse {
    fn from(report: AuditReport) -> Self {
        Self {
            url: report.url,
            security_score: report.score,
            issues: report.issues,
        }
    }
}

/// JSON body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
}
