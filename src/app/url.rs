//! URL validation for audit requests.

use log::warn;
use url::Url;

use crate::config::MAX_URL_LENGTH;
use crate::error_handling::AuditError;

/// A validated audit target.
///
/// Keeps the URL exactly as submitted (after trimming surrounding whitespace)
/// next to its parsed form. The raw string is what reports echo back and what
/// the internal-link check matches href prefixes against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditTarget {
    raw: String,
    parsed: Url,
}

impl AuditTarget {
    /// The URL as submitted.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed URL.
    pub fn url(&self) -> &Url {
        &self.parsed
    }

    /// Returns true when the URL scheme is `https`.
    pub fn is_https(&self) -> bool {
        self.parsed.scheme() == "https"
    }

    /// Path component of the URL (always starts with `/` for http(s) URLs).
    pub fn path(&self) -> &str {
        self.parsed.path()
    }
}

/// Validates the URL of an audit request.
///
/// Unlike a crawler, the audit does not normalize its input: a URL without a
/// scheme is rejected rather than upgraded to `https://`, because the HTTPS
/// check must see what the caller submitted.
///
/// # Errors
///
/// - `AuditError::MissingUrl` if the URL is absent or blank
/// - `AuditError::InvalidUrl` if it is too long, does not parse, is not
///   http/https, or has no host
pub fn validate_audit_url(url: Option<&str>) -> Result<AuditTarget, AuditError> {
    let raw = match url.map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Err(AuditError::MissingUrl),
    };

    if raw.len() > MAX_URL_LENGTH {
        warn!(
            "Rejecting URL exceeding maximum length ({} > {})",
            raw.len(),
            MAX_URL_LENGTH
        );
        return Err(invalid(raw, format!("longer than {MAX_URL_LENGTH} characters")));
    }

    let parsed = Url::parse(raw).map_err(|e| invalid(raw, e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(raw, format!("unsupported scheme '{other}'"))),
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(invalid(raw, "missing host".to_string()));
    }

    Ok(AuditTarget {
        raw: raw.to_string(),
        parsed,
    })
}

fn invalid(raw: &str, reason: String) -> AuditError {
    AuditError::InvalidUrl {
        url: raw.chars().take(100).collect(),
        reason,
    }
}
