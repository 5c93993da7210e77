//! Error type definitions.
//!
//! This module defines the errors that end an audit, the classification of
//! failed HTTP requests, and initialization errors.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Why an HTTP request (page fetch or link probe) did not produce a usable response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// The request did not complete within its timeout.
    #[error("timed out")]
    Timeout,
    /// DNS resolution or the TCP/TLS connection failed.
    #[error("connection failed")]
    Connect,
    /// A response arrived with a status that is not accepted.
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    /// Too many redirects, or a redirect loop.
    #[error("redirect error")]
    Redirect,
    /// The response body could not be read.
    #[error("failed to read response body")]
    Body,
    /// Any other request failure.
    #[error("request failed: {0}")]
    Request(String),
}

impl FetchFailure {
    /// Returns true for failures that may succeed on a later attempt.
    ///
    /// Only timeouts and connection failures qualify; a status code is an answer.
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchFailure::Timeout | FetchFailure::Connect)
    }
}

/// Errors that end an audit request.
///
/// Variants fall into two classes: invalid input (rejected before any network
/// call) and upstream failures of the primary page fetch. Failures of link
/// probes never become an `AuditError`.
#[derive(Error, Debug)]
pub enum AuditError {
    /// The request body did not include a URL.
    #[error("request did not include a URL")]
    MissingUrl,

    /// The URL is not an absolute http(s) URL with a host.
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// URL as submitted (truncated when very long)
        url: String,
        /// What is wrong with it
        reason: String,
    },

    /// The audited page could not be fetched.
    #[error("failed to fetch {url}: {failure}")]
    Fetch {
        /// URL of the audited page
        url: String,
        /// Classified cause
        failure: FetchFailure,
    },

    /// The audited page is larger than the body size limit.
    #[error("response body for {url} exceeds {limit} bytes")]
    BodyTooLarge {
        /// URL of the audited page
        url: String,
        /// Limit in bytes
        limit: usize,
    },

    /// The audit was abandoned because the service is shutting down.
    #[error("audit of {url} was cancelled")]
    Cancelled {
        /// URL of the audited page
        url: String,
    },
}

impl AuditError {
    /// Returns true when the caller sent bad input (as opposed to an upstream failure).
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, AuditError::MissingUrl | AuditError::InvalidUrl { .. })
    }
}
