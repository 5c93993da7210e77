//! Security header rule engine.
//!
//! Fifteen header checks in a fixed order. Each rule carries an explicit
//! [`Polarity`]: most headers are expected to be present, while `server` is
//! expected to be absent because it discloses the server software.

use super::report::{assemble, AuditReport, Finding, Issue, ScorePolicy};
use crate::config::{
    HEADER_ACCESS_CONTROL_ALLOW_ORIGIN, HEADER_CACHE_CONTROL, HEADER_CONTENT_SECURITY_POLICY,
    HEADER_CROSS_ORIGIN_EMBEDDER_POLICY, HEADER_CROSS_ORIGIN_OPENER_POLICY,
    HEADER_CROSS_ORIGIN_RESOURCE_POLICY, HEADER_EXPECT_CT, HEADER_PERMISSIONS_POLICY,
    HEADER_REFERRER_POLICY, HEADER_SERVER, HEADER_SET_COOKIE, HEADER_STRICT_TRANSPORT_SECURITY,
    HEADER_X_CONTENT_TYPE_OPTIONS, HEADER_X_FRAME_OPTIONS, HEADER_X_XSS_PROTECTION,
};
use crate::fetch::HeaderSet;

/// When a header rule raises an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// The header is expected; its absence is an issue
    FlagWhenAbsent,
    /// The header leaks information; its presence is an issue
    FlagWhenPresent,
}

/// One row of the security rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderRule {
    /// Lowercase header name
    pub header: &'static str,
    pub polarity: Polarity,
    pub deduction: i32,
    pub message: &'static str,
    /// Remediation snippet shown to the user
    pub solution: &'static str,
}

impl HeaderRule {
    const fn absent(
        header: &'static str,
        deduction: i32,
        message: &'static str,
        solution: &'static str,
    ) -> Self {
        Self {
            header,
            polarity: Polarity::FlagWhenAbsent,
            deduction,
            message,
            solution,
        }
    }

    /// Evaluates the rule against a response's headers.
    pub fn evaluate(&self, headers: &HeaderSet) -> Option<Finding> {
        let present = headers.is_present(self.header);
        let violated = match self.polarity {
            Polarity::FlagWhenAbsent => !present,
            Polarity::FlagWhenPresent => present,
        };
        violated.then(|| Finding {
            issue: Issue::with_solution(self.message, self.solution),
            deduction: self.deduction,
        })
    }
}

/// Security header rules in reporting order.
///
/// `set-cookie` is flagged when absent even though a page without a session
/// cookie is not insecure; the check really targets cookie attributes.
pub static SECURITY_RULES: &[HeaderRule] = &[
    HeaderRule::absent(
        HEADER_CONTENT_SECURITY_POLICY,
        20,
        "Missing Content-Security-Policy (protects against XSS and injection attacks)",
        "Content-Security-Policy: default-src 'self'",
    ),
    HeaderRule::absent(
        HEADER_X_FRAME_OPTIONS,
        15,
        "Missing X-Frame-Options (protects against clickjacking)",
        "X-Frame-Options: DENY",
    ),
    HeaderRule::absent(
        HEADER_X_XSS_PROTECTION,
        15,
        "Missing X-XSS-Protection (legacy browser XSS filter)",
        "X-XSS-Protection: 1; mode=block",
    ),
    HeaderRule::absent(
        HEADER_STRICT_TRANSPORT_SECURITY,
        10,
        "Missing Strict-Transport-Security (enforces HTTPS)",
        "Strict-Transport-Security: max-age=31536000; includeSubDomains; preload",
    ),
    HeaderRule::absent(
        HEADER_REFERRER_POLICY,
        10,
        "Missing Referrer-Policy (controls referrer information sent to other sites)",
        "Referrer-Policy: no-referrer",
    ),
    HeaderRule::absent(
        HEADER_PERMISSIONS_POLICY,
        10,
        "Missing Permissions-Policy (restricts browser feature access)",
        "Permissions-Policy: camera=(), microphone=(), geolocation=()",
    ),
    HeaderRule::absent(
        HEADER_CROSS_ORIGIN_RESOURCE_POLICY,
        10,
        "Missing Cross-Origin-Resource-Policy (prevents unwanted cross-origin resource sharing)",
        "Cross-Origin-Resource-Policy: same-origin",
    ),
    HeaderRule::absent(
        HEADER_CROSS_ORIGIN_OPENER_POLICY,
        10,
        "Missing Cross-Origin-Opener-Policy (isolates the browsing context from Spectre-style attacks)",
        "Cross-Origin-Opener-Policy: same-origin",
    ),
    HeaderRule::absent(
        HEADER_CROSS_ORIGIN_EMBEDDER_POLICY,
        10,
        "Missing Cross-Origin-Embedder-Policy (protects against side-channel leaks)",
        "Cross-Origin-Embedder-Policy: require-corp",
    ),
    HeaderRule::absent(
        HEADER_EXPECT_CT,
        10,
        "Missing Expect-CT (guards against misissued TLS certificates)",
        "Expect-CT: max-age=86400, enforce",
    ),
    HeaderRule::absent(
        HEADER_X_CONTENT_TYPE_OPTIONS,
        10,
        "Missing X-Content-Type-Options (prevents MIME sniffing)",
        "X-Content-Type-Options: nosniff",
    ),
    HeaderRule::absent(
        HEADER_CACHE_CONTROL,
        10,
        "Missing Cache-Control (keeps sensitive responses out of shared caches)",
        "Cache-Control: no-store, no-cache, must-revalidate, proxy-revalidate",
    ),
    HeaderRule::absent(
        HEADER_ACCESS_CONTROL_ALLOW_ORIGIN,
        10,
        "Missing CORS policy (Access-Control-Allow-Origin)",
        "Access-Control-Allow-Origin: https://yourdomain.com",
    ),
    HeaderRule {
        header: HEADER_SERVER,
        polarity: Polarity::FlagWhenPresent,
        deduction: 5,
        message: "Server header discloses server software (hide it)",
        solution: "Remove the Server header from responses",
    },
    HeaderRule::absent(
        HEADER_SET_COOKIE,
        10,
        "Cookies are missing Secure, HttpOnly and SameSite attributes (reduces XSS and CSRF risk)",
        "Set-Cookie: sessionId=<value>; Secure; HttpOnly; SameSite=Strict",
    ),
];

/// Evaluates every security rule against `headers` and assembles the report.
pub fn evaluate_security(url: &str, headers: &HeaderSet, policy: ScorePolicy) -> AuditReport {
    assemble(
        url,
        SECURITY_RULES.iter().filter_map(|rule| rule.evaluate(headers)),
        policy,
    )
}
