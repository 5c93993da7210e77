//! Error categorization and retry strategy.
//!
//! This module maps `reqwest` errors onto `FetchFailure` and configures the
//! backoff used when link probes are retried.

use std::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;

use super::types::FetchFailure;
use crate::config::{RETRY_FACTOR, RETRY_INITIAL_DELAY_MS, RETRY_MAX_DELAY_SECS};

/// Creates an exponential backoff retry strategy for link probes.
///
/// The iterator yields at most `retries` delays, so `retries == 0` means the
/// probe runs exactly once.
pub fn get_retry_strategy(retries: usize) -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(RETRY_INITIAL_DELAY_MS)
        .factor(RETRY_FACTOR)
        .max_delay(Duration::from_secs(RETRY_MAX_DELAY_SECS))
        .take(retries)
}

/// Categorizes a `reqwest::Error` into a `FetchFailure`.
///
/// Status errors (from `error_for_status`) keep their code; everything else is
/// classified by the reqwest error kind.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> FetchFailure {
    if let Some(status) = error.status() {
        return FetchFailure::Status(status.as_u16());
    }

    if error.is_timeout() {
        FetchFailure::Timeout
    } else if error.is_connect() {
        FetchFailure::Connect
    } else if error.is_redirect() {
        FetchFailure::Redirect
    } else if error.is_body() || error.is_decode() {
        FetchFailure::Body
    } else {
        FetchFailure::Request(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_retry_strategy_zero_retries() {
        assert_eq!(get_retry_strategy(0).count(), 0);
    }

    #[test]
    fn test_get_retry_strategy_is_bounded() {
        assert_eq!(get_retry_strategy(3).count(), 3);
    }

    #[test]
    fn test_get_retry_strategy_exponential_backoff() {
        let delays: Vec<Duration> = get_retry_strategy(5).collect();

        // Delays never shrink and never exceed the cap
        let max_delay = Duration::from_secs(RETRY_MAX_DELAY_SECS);
        for pair in delays.windows(2) {
            assert!(pair[1] >= pair[0], "{:?} should be >= {:?}", pair[1], pair[0]);
        }
        assert!(delays.iter().all(|d| *d <= max_delay));
    }

    #[test]
    fn test_fetch_failure_transient() {
        assert!(FetchFailure::Timeout.is_transient());
        assert!(FetchFailure::Connect.is_transient());
        assert!(!FetchFailure::Status(404).is_transient());
        assert!(!FetchFailure::Status(301).is_transient());
        assert!(!FetchFailure::Redirect.is_transient());
        assert!(!FetchFailure::Request("builder".into()).is_transient());
    }

    #[tokio::test]
    async fn test_categorize_connection_refused() {
        // Port 1 on loopback is not listening; the connect fails immediately
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        let err = client.get("http://127.0.0.1:1/").send().await.unwrap_err();
        assert_eq!(categorize_reqwest_error(&err), FetchFailure::Connect);
    }

    #[tokio::test]
    async fn test_categorize_invalid_url_is_request_error() {
        let client = reqwest::Client::new();
        let err = client.get("not a url").send().await.unwrap_err();
        assert!(matches!(
            categorize_reqwest_error(&err),
            FetchFailure::Request(_)
        ));
    }
}
