//! Application plumbing shared by the server and the audits.
//!
//! This module provides request URL validation and shutdown handling.

pub mod shutdown;
pub mod url;

// Re-export public API
pub use shutdown::shutdown_signal;
pub use url::{validate_audit_url, AuditTarget};
