//! Link validation.
//!
//! Probes every absolute anchor on the page and counts the ones that are
//! broken. Probes run as a bounded fan-out; a failed probe is recorded and
//! never aborts its siblings or the audit.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use log::debug;
use reqwest::StatusCode;
use tokio_retry::RetryIf;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error_handling::{categorize_reqwest_error, get_retry_strategy, FetchFailure};
use crate::fetch::RequestHeaders;
use crate::parse::Anchor;

/// Outcome of checking one anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkCheckResult {
    /// The link answered 200.
    Reachable,
    /// The probe failed or the link answered something other than 200.
    Unreachable(FetchFailure),
    /// Not probed: relative, fragment or non-http href. Carries the href,
    /// empty when the anchor has no `href` attribute.
    Skipped(String),
}

/// Limits applied to link validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkCheckOptions {
    /// Maximum probes in flight at once
    pub max_concurrency: usize,
    /// Timeout for each probe attempt
    pub probe_timeout: Duration,
    /// Extra attempts for probes that timed out or failed to connect
    pub retries: usize,
}

impl Default for LinkCheckOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for LinkCheckOptions {
    fn from(config: &Config) -> Self {
        Self {
            max_concurrency: config.max_link_concurrency,
            probe_timeout: config.probe_timeout(),
            retries: config.probe_retries,
        }
    }
}

/// Aggregate of all link checks for one page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkSummary {
    /// Anchors that were probed
    pub probed: usize,
    pub reachable: usize,
    pub broken: usize,
    pub skipped: usize,
}

impl LinkSummary {
    fn record(&mut self, result: &LinkCheckResult) {
        match result {
            LinkCheckResult::Reachable => {
                self.probed += 1;
                self.reachable += 1;
            }
            LinkCheckResult::Unreachable(_) => {
                self.probed += 1;
                self.broken += 1;
            }
            LinkCheckResult::Skipped(_) => self.skipped += 1,
        }
    }
}

impl<'a> FromIterator<&'a LinkCheckResult> for LinkSummary {
    fn from_iter<I: IntoIterator<Item = &'a LinkCheckResult>>(iter: I) -> Self {
        let mut summary = LinkSummary::default();
        for result in iter {
            summary.record(result);
        }
        summary
    }
}

/// Returns true for hrefs that get a liveness probe.
///
/// Only absolute hrefs starting with `http` are probed, which covers both
/// `http://` and `https://`.
pub fn is_probe_candidate(href: &str) -> bool {
    href.starts_with("http")
}

/// Checks a single href.
///
/// Non-candidate hrefs are skipped without any network traffic. Transient
/// failures (timeout, connect) are retried up to `options.retries` times with
/// exponential backoff; a non-200 status is final.
pub async fn probe_link(
    client: &reqwest::Client,
    href: &str,
    options: &LinkCheckOptions,
) -> LinkCheckResult {
    if !is_probe_candidate(href) {
        return LinkCheckResult::Skipped(href.to_string());
    }

    let timeout = options.probe_timeout;
    let result = RetryIf::spawn(
        get_retry_strategy(options.retries),
        || probe_once(client, href, timeout),
        |failure: &FetchFailure| {
            let retry = failure.is_transient();
            if retry {
                debug!("Retrying probe of {href} after {failure}");
            }
            retry
        },
    )
    .await;

    match result {
        Ok(()) => LinkCheckResult::Reachable,
        Err(failure) => {
            debug!("Link {href} is broken: {failure}");
            LinkCheckResult::Unreachable(failure)
        }
    }
}

async fn probe_once(
    client: &reqwest::Client,
    href: &str,
    timeout: Duration,
) -> Result<(), FetchFailure> {
    let request = RequestHeaders::apply_to_request_builder(client.get(href));
    match tokio::time::timeout(timeout, request.send()).await {
        Err(_) => Err(FetchFailure::Timeout),
        Ok(Err(e)) => Err(categorize_reqwest_error(&e)),
        Ok(Ok(response)) if response.status() == StatusCode::OK => Ok(()),
        Ok(Ok(response)) => Err(FetchFailure::Status(response.status().as_u16())),
    }
}

/// Checks every anchor of a page and aggregates the outcomes.
///
/// Candidate anchors are probed with at most `options.max_concurrency` probes
/// in flight. Each anchor is checked on its own, so an href that appears
/// twice is probed (and counted) twice.
///
/// Returns `None` if `cancel` fires before all probes finish; in-flight
/// probes are dropped.
pub async fn validate_links(
    client: &reqwest::Client,
    anchors: &[Anchor],
    options: &LinkCheckOptions,
    cancel: &CancellationToken,
) -> Option<LinkSummary> {
    let mut summary = LinkSummary::default();
    let mut candidates = Vec::new();
    for anchor in anchors {
        match anchor.href.as_deref() {
            Some(href) if is_probe_candidate(href) => candidates.push(href.to_string()),
            other => summary.record(&LinkCheckResult::Skipped(
                other.unwrap_or_default().to_string(),
            )),
        }
    }

    debug!(
        "Probing {} links ({} skipped, concurrency {})",
        candidates.len(),
        summary.skipped,
        options.max_concurrency
    );

    let probes = stream::iter(candidates)
        .map(|href: String| async move { probe_link(client, &href, options).await })
        .buffer_unordered(options.max_concurrency.max(1))
        .fold(summary, |mut summary, result| async move {
            summary.record(&result);
            summary
        });

    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            debug!("Link validation cancelled");
            None
        }
        summary = probes => Some(summary),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn options() -> LinkCheckOptions {
        LinkCheckOptions {
            max_concurrency: 4,
            probe_timeout: Duration::from_secs(2),
            retries: 0,
        }
    }

    fn probe_client() -> reqwest::Client {
        reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap()
    }

    fn anchor(href: Option<&str>) -> Anchor {
        Anchor {
            href: href.map(str::to_string),
        }
    }

    #[test]
    fn test_is_probe_candidate() {
        assert!(is_probe_candidate("https://example.com"));
        assert!(is_probe_candidate("http://example.com"));
        assert!(!is_probe_candidate("/about"));
        assert!(!is_probe_candidate("#top"));
        assert!(!is_probe_candidate("mailto:someone@example.com"));
        assert!(!is_probe_candidate("//cdn.example.com/x"));
    }

    #[test]
    fn test_summary_from_results() {
        let results = [
            LinkCheckResult::Reachable,
            LinkCheckResult::Unreachable(FetchFailure::Timeout),
            LinkCheckResult::Skipped("/about".into()),
            LinkCheckResult::Unreachable(FetchFailure::Status(404)),
        ];
        let summary: LinkSummary = results.iter().collect();
        assert_eq!(
            summary,
            LinkSummary {
                probed: 3,
                reachable: 1,
                broken: 2,
                skipped: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_probe_link_skips_relative_without_request() {
        let result = probe_link(&probe_client(), "/relative/path", &options()).await;
        assert_eq!(result, LinkCheckResult::Skipped("/relative/path".into()));
    }

    #[tokio::test]
    async fn test_probe_link_statuses() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/moved"))
            .respond_with(
                ResponseTemplate::new(301).insert_header("Location", format!("{}/ok", server.uri())),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/created"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/error"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = probe_client();
        let check = |p: &str| format!("{}{}", server.uri(), p);

        assert_eq!(
            probe_link(&client, &check("/ok"), &options()).await,
            LinkCheckResult::Reachable
        );
        // Redirects are not followed and count as broken
        assert_eq!(
            probe_link(&client, &check("/moved"), &options()).await,
            LinkCheckResult::Unreachable(FetchFailure::Status(301))
        );
        // Only exactly 200 is reachable
        assert_eq!(
            probe_link(&client, &check("/created"), &options()).await,
            LinkCheckResult::Unreachable(FetchFailure::Status(204))
        );
        assert_eq!(
            probe_link(&client, &check("/error"), &options()).await,
            LinkCheckResult::Unreachable(FetchFailure::Status(500))
        );
        // Unmatched path: wiremock answers 404
        assert_eq!(
            probe_link(&client, &check("/missing"), &options()).await,
            LinkCheckResult::Unreachable(FetchFailure::Status(404))
        );
    }

    #[tokio::test]
    async fn test_probe_link_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let opts = LinkCheckOptions {
            probe_timeout: Duration::from_millis(200),
            ..options()
        };
        let result = probe_link(&probe_client(), &server.uri(), &opts).await;
        assert_eq!(result, LinkCheckResult::Unreachable(FetchFailure::Timeout));
    }

    #[tokio::test]
    async fn test_probe_link_malformed_absolute_href_is_broken() {
        let result = probe_link(&probe_client(), "http//missing-colon", &options()).await;
        assert!(matches!(result, LinkCheckResult::Unreachable(_)));
    }

    #[tokio::test]
    async fn test_probe_link_retries_transient_failures() {
        let server = MockServer::start().await;
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);
        Mock::given(method("GET"))
            .respond_with(move |_req: &wiremock::Request| {
                // First attempt hangs past the probe timeout, second answers
                if calls_clone.fetch_add(1, Ordering::SeqCst) == 0 {
                    ResponseTemplate::new(200).set_delay(Duration::from_secs(3))
                } else {
                    ResponseTemplate::new(200)
                }
            })
            .mount(&server)
            .await;

        let opts = LinkCheckOptions {
            probe_timeout: Duration::from_millis(300),
            retries: 2,
            ..options()
        };
        let result = probe_link(&probe_client(), &server.uri(), &opts).await;
        assert_eq!(result, LinkCheckResult::Reachable);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_probe_link_does_not_retry_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let opts = LinkCheckOptions {
            retries: 3,
            ..options()
        };
        let result = probe_link(&probe_client(), &server.uri(), &opts).await;
        assert_eq!(result, LinkCheckResult::Unreachable(FetchFailure::Status(404)));
    }

    #[tokio::test]
    async fn test_validate_links_counts_only_actual_failures() {
        // Two reachable links and one connection failure: exactly one broken
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let anchors = vec![
            anchor(Some(&format!("{}/a", server.uri()))),
            anchor(Some(&format!("{}/b", server.uri()))),
            anchor(Some("http://127.0.0.1:1/refused")),
        ];
        let summary = validate_links(
            &probe_client(),
            &anchors,
            &options(),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(summary.probed, 3);
        assert_eq!(summary.reachable, 2);
        assert_eq!(summary.broken, 1);
    }

    #[tokio::test]
    async fn test_validate_links_skips_relative_and_missing_hrefs() {
        let anchors = vec![
            anchor(None),
            anchor(Some("/about")),
            anchor(Some("#top")),
            anchor(Some("")),
        ];
        let summary = validate_links(
            &probe_client(),
            &anchors,
            &options(),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(
            summary,
            LinkSummary {
                probed: 0,
                reachable: 0,
                broken: 0,
                skipped: 4,
            }
        );
    }

    #[tokio::test]
    async fn test_validate_links_no_anchors() {
        let summary = validate_links(
            &probe_client(),
            &[],
            &options(),
            &CancellationToken::new(),
        )
        .await
        .unwrap();
        assert_eq!(summary, LinkSummary::default());
    }

    #[tokio::test]
    async fn test_validate_links_runs_concurrently() {
        // Eight links that each take 500ms finish well under the 4s a
        // sequential loop would need
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let anchors: Vec<Anchor> = (0..8)
            .map(|i| anchor(Some(&format!("{}/page/{i}", server.uri()))))
            .collect();
        let opts = LinkCheckOptions {
            max_concurrency: 8,
            ..options()
        };

        let start = std::time::Instant::now();
        let summary = validate_links(&probe_client(), &anchors, &opts, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(summary.reachable, 8);
        assert!(
            start.elapsed() < Duration::from_secs(2),
            "probes took {:?}",
            start.elapsed()
        );
    }

    #[tokio::test]
    async fn test_validate_links_cancelled() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let anchors = vec![anchor(Some(&server.uri()))];
        let opts = LinkCheckOptions {
            probe_timeout: Duration::from_secs(10),
            ..options()
        };
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            trigger.cancel();
        });

        let start = std::time::Instant::now();
        let result = validate_links(&probe_client(), &anchors, &opts, &cancel).await;
        assert!(result.is_none());
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    /// Serves `200` after `delay` on every connection and records the highest
    /// number of requests it held at once.
    async fn counting_server(delay: Duration) -> (String, Arc<AtomicUsize>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let in_flight = Arc::new(AtomicUsize::new(0));
        let high_water = Arc::new(AtomicUsize::new(0));
        let high_water_clone = Arc::clone(&high_water);

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let in_flight = Arc::clone(&in_flight);
                let high_water = Arc::clone(&high_water_clone);
                tokio::spawn(async move {
                    let mut buf = [0u8; 2048];
                    if socket.read(&mut buf).await.unwrap_or(0) == 0 {
                        return;
                    }
                    let current = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    high_water.fetch_max(current, Ordering::SeqCst);
                    tokio::time::sleep(delay).await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                    let _ = socket
                        .write_all(
                            b"HTTP/1.1 200 OK\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
                        )
                        .await;
                });
            }
        });

        (format!("http://{addr}"), high_water)
    }

    #[tokio::test]
    async fn test_validate_links_respects_concurrency_limit() {
        let (base, high_water) = counting_server(Duration::from_millis(150)).await;
        let anchors: Vec<Anchor> = (0..10)
            .map(|i| anchor(Some(&format!("{base}/page/{i}"))))
            .collect();
        let opts = LinkCheckOptions {
            max_concurrency: 3,
            ..options()
        };

        let summary = validate_links(&probe_client(), &anchors, &opts, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(summary.reachable, 10);
        let observed = high_water.load(Ordering::SeqCst);
        assert!(observed >= 1, "no request reached the server");
        assert!(
            observed <= opts.max_concurrency,
            "{observed} probes in flight with a limit of {}",
            opts.max_concurrency
        );
    }

    fn assert_send<T: Send>(_: &T) {}

    #[test]
    fn test_validate_links_future_is_send() {
        // Handlers run on a multi-threaded runtime, so the future must be Send
        let client = probe_client();
        let anchors = vec![anchor(Some("https://example.com"))];
        let opts = options();
        let cancel = CancellationToken::new();
        let future = validate_links(&client, &anchors, &opts, &cancel);
        assert_send(&future);
    }
}
