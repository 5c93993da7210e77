//! Error handling.
//!
//! This module provides:
//! - `AuditError`, the errors that end an audit request
//! - `FetchFailure`, the classification of failed HTTP requests
//! - `InitializationError` for logger and client setup
//! - The retry strategy used for link probes
//!
//! Audit errors fall into two classes:
//! - **Invalid input**: missing or malformed URL, rejected before any network call
//! - **Upstream failure**: the audited page itself could not be fetched
//!
//! Failed link probes are not errors at this level; they are folded into the
//! broken-link count of the SEO report.

mod categorization;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, get_retry_strategy};
pub use types::{AuditError, FetchFailure, InitializationError};
