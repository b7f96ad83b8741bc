//! Fetch executor: a single GET with timeout, retry and backoff
//!
//! The foundation every other component calls. Each attempt carries its own
//! deadline; network-level failures wait a linearly growing backoff before
//! the next attempt, while non-2xx responses are counted against the
//! attempt budget and retried immediately. The terminal outcome always
//! reflects the last response or error seen.

use crate::fetch::throttle::HostThrottle;
use crate::SweepError;
use reqwest::header::HeaderMap;
use reqwest::Client;
use std::time::Duration;

/// A successful fetch: 2xx status, headers and the raw payload
#[derive(Debug)]
pub struct FetchedResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Final URL after redirects
    pub final_url: String,
    /// Raw body bytes, before any payload-level decompression
    pub body: Vec<u8>,
}

impl FetchedResponse {
    /// Content-Type header value, empty string when absent
    pub fn content_type(&self) -> &str {
        header_str(&self.headers, "content-type")
    }

    /// Content-Encoding header value, empty string when absent
    pub fn content_encoding(&self) -> &str {
        header_str(&self.headers, "content-encoding")
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

/// Fetches a URL, retrying up to `max_attempts` times
///
/// Waits on the host throttle before every attempt. A non-2xx status is a
/// retryable failure, not an immediate error; timeouts and connection
/// errors sleep `backoff × attempt` before retrying.
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `throttle` - Per-host request spacing registry
/// * `url` - The URL to fetch
/// * `max_attempts` - Attempt budget, at least 1
/// * `timeout` - Per-attempt deadline
/// * `backoff` - Base delay for the retry backoff
///
/// # Returns
///
/// * `Ok(FetchedResponse)` - First 2xx response observed
/// * `Err(SweepError::FetchExhausted)` - Budget spent; carries the last error
pub async fn fetch_with_retry(
    client: &Client,
    throttle: &HostThrottle,
    url: &str,
    max_attempts: u32,
    timeout: Duration,
    backoff: Duration,
) -> Result<FetchedResponse, SweepError> {
    let host = crate::url::host_key(url);
    let mut last_error = String::from("no attempts made");

    for attempt in 1..=max_attempts.max(1) {
        throttle.wait(&host).await;

        match client.get(url).timeout(timeout).send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    let final_url = response.url().to_string();
                    let headers = response.headers().clone();
                    match response.bytes().await {
                        Ok(body) => {
                            return Ok(FetchedResponse {
                                status: status.as_u16(),
                                headers,
                                final_url,
                                body: body.to_vec(),
                            });
                        }
                        Err(e) => {
                            last_error = format!("body read failed: {}", e);
                        }
                    }
                } else {
                    // Counted against the budget but retried without backoff,
                    // the status may be a transient upstream rejection.
                    last_error = format!("upstream status {}", status.as_u16());
                    tracing::debug!(
                        "Attempt {}/{} for {} got status {}",
                        attempt,
                        max_attempts,
                        url,
                        status
                    );
                    continue;
                }
            }
            Err(e) => {
                last_error = classify_error(&e);
                tracing::debug!(
                    "Attempt {}/{} for {} failed: {}",
                    attempt,
                    max_attempts,
                    url,
                    last_error
                );
            }
        }

        if attempt < max_attempts {
            tokio::time::sleep(backoff * attempt).await;
        }
    }

    Err(SweepError::FetchExhausted {
        url: url.to_string(),
        message: last_error,
    })
}

/// Maps a reqwest error to a short description of the failure class
fn classify_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "request timeout".to_string()
    } else if e.is_connect() {
        "connection failed".to_string()
    } else if e.is_redirect() {
        "redirect loop or limit exceeded".to_string()
    } else {
        e.to_string()
    }
}
