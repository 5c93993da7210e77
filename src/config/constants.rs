//! Configuration constants.
//!
//! This module defines the limits, timeouts and defaults used throughout the
//! application. Values exposed on the command line use these as defaults.

/// Address the HTTP server binds to by default.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
/// Port the HTTP server listens on by default.
pub const DEFAULT_PORT: u16 = 5000;

/// Timeout for fetching the audited page, in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
/// TCP connection timeout in seconds (applies to page fetches and link probes)
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;
/// Timeout for a single link probe, in seconds.
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 5;
/// Maximum number of link probes in flight for one audit.
///
/// Kept small so a page full of links to the same host does not turn into a
/// burst against that host.
pub const DEFAULT_MAX_LINK_CONCURRENCY: usize = 8;
/// Upper bound accepted for `--max-link-concurrency`.
pub const MAX_LINK_CONCURRENCY_LIMIT: usize = 64;
/// Upper bound accepted for `--probe-retries`.
pub const MAX_PROBE_RETRIES: usize = 5;

/// Default User-Agent string for HTTP requests.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

// Response and body size limits
/// Maximum response body size in bytes (2MB)
/// Pages larger than this fail the audit instead of being parsed
pub const MAX_RESPONSE_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Maximum URL length (2048 characters), matching common browser and server limits.
pub const MAX_URL_LENGTH: usize = 2048;

// Retry strategy for link probes
/// Initial delay in milliseconds before the first probe retry
pub const RETRY_INITIAL_DELAY_MS: u64 = 200;
/// Factor by which retry delay is multiplied on each attempt
pub const RETRY_FACTOR: u64 = 2;
/// Maximum delay between probe retries in seconds
pub const RETRY_MAX_DELAY_SECS: u64 = 2;

// Scoring
/// Score every report starts from before deductions.
pub const BASE_SCORE: i32 = 100;
/// Meta descriptions longer than this (in characters) are flagged.
pub const MAX_META_DESCRIPTION_CHARS: usize = 155;
/// Pages with fewer body words than this are flagged as thin content.
pub const MIN_BODY_WORD_COUNT: usize = 300;
/// Pages with fewer internal links than this are flagged.
pub const MIN_INTERNAL_LINKS: usize = 3;
