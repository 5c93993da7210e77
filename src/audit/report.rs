//! Report assembly.
//!
//! Rule engines produce [`Finding`]s in rule-declaration order; [`assemble`]
//! folds them into an immutable [`AuditReport`].

use serde::Serialize;

use crate::config::BASE_SCORE;

/// A deficiency reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Human-readable explanation
    pub message: String,
    /// Remediation snippet (security issues only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
}

impl Issue {
    /// An issue without a remediation snippet.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            solution: None,
        }
    }

    /// An issue with a remediation snippet.
    pub fn with_solution(message: impl Into<String>, solution: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            solution: Some(solution.into()),
        }
    }
}

/// A triggered rule: the issue it raises and the points it costs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub issue: Issue,
    pub deduction: i32,
}

/// How the final score is bounded.
///
/// Deductions across all rules can add up to more than the base score. By
/// default the score is reported as computed, negative values included, so
/// two badly broken pages can still be told apart. `ClampAtZero` is opt-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScorePolicy {
    /// `100 - sum(deductions)`, possibly negative
    #[default]
    Unclamped,
    /// `max(0, 100 - sum(deductions))`
    ClampAtZero,
}

impl ScorePolicy {
    fn apply(self, score: i32) -> i32 {
        match self {
            ScorePolicy::Unclamped => score,
            ScorePolicy::ClampAtZero => score.max(0),
        }
    }
}

/// Result of one audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditReport {
    /// Audited URL, as submitted
    pub url: String,
    pub score: i32,
    /// Issues in rule-declaration order
    pub issues: Vec<Issue>,
}

/// Folds findings into a report.
///
/// The score is `BASE_SCORE` minus the sum of all deductions, bounded by
/// `policy`. Issue order follows the order of `findings`.
pub fn assemble(
    url: &str,
    findings: impl IntoIterator<Item = Finding>,
    policy: ScorePolicy,
) -> AuditReport {
    let (deducted, issues) = findings.into_iter().fold(
        (0i32, Vec::new()),
        |(deducted, mut issues), finding| {
            issues.push(finding.issue);
            (deducted + finding.deduction, issues)
        },
    );

    AuditReport {
        url: url.to_string(),
        score: policy.apply(BASE_SCORE - deducted),
        issues,
    }
}
