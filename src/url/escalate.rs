//! URL escalation resolver
//!
//! Given one logical target, enumerates the concrete URLs worth trying, in
//! priority order: https without `www`, https with `www`, then the same
//! pair over plain http. When every direct variant fails, single-page
//! retrieval may additionally escalate to a public read-only rendering
//! proxy. Each enumerator is a pure function from input URL to candidates;
//! the caller walks the combined list and short-circuits on the first 2xx.

use crate::config::FetchConfig;
use crate::fetch::{fetch_with_retry, FetchedResponse, HostThrottle};
use crate::SweepError;
use reqwest::Client;
use url::Url;

/// Public read-only rendering proxy for pages that block direct fetches
pub const RENDER_PROXY: &str = "https://r.jina.ai/";

/// Enumerates the four protocol/www variants of a URL, in priority order
///
/// The hostname is stripped of a leading `www.` first, so the variants are
/// exactly: https-bare, https-www, http-bare, http-www. Port, path and
/// query are preserved.
pub fn direct_variants(url: &Url) -> Vec<String> {
    let host = match url.host_str() {
        Some(h) => crate::url::bare_host(h),
        None => return vec![url.to_string()],
    };
    let port = url.port().map(|p| format!(":{}", p)).unwrap_or_default();
    let tail = path_and_query(url);

    vec![
        format!("https://{}{}{}", host, port, tail),
        format!("https://www.{}{}{}", host, port, tail),
        format!("http://{}{}{}", host, port, tail),
        format!("http://www.{}{}{}", host, port, tail),
    ]
}

/// Enumerates the rendering-proxy fallbacks for a URL
///
/// The original URL is stripped of its scheme and submitted to the proxy
/// twice, once re-prefixed with `http://` and once with `https://`. Only
/// single-page retrieval uses these; feeding XML through an HTML-rendering
/// proxy would corrupt structure.
pub fn proxy_variants(url: &Url) -> Vec<String> {
    let authority = match url.host_str() {
        Some(h) => h,
        None => return Vec::new(),
    };
    let port = url.port().map(|p| format!(":{}", p)).unwrap_or_default();
    let tail = path_and_query(url);

    vec![
        format!("{}http://{}{}{}", RENDER_PROXY, authority, port, tail),
        format!("{}https://{}{}{}", RENDER_PROXY, authority, port, tail),
    ]
}

fn path_and_query(url: &Url) -> String {
    match url.query() {
        Some(q) => format!("{}?{}", url.path(), q),
        None => url.path().to_string(),
    }
}

/// Tries candidate URLs through the fetch executor until one succeeds
///
/// # Arguments
///
/// * `candidates` - Ordered concrete URLs from the enumerators above
/// * `logical_url` - The caller's original target, used in the error
///
/// # Returns
///
/// * `Ok(FetchedResponse)` - First candidate that yielded a 2xx
/// * `Err(SweepError::EscalationExhausted)` - Every candidate failed;
///   carries the last error observed
pub async fn fetch_escalated(
    client: &Client,
    throttle: &HostThrottle,
    config: &FetchConfig,
    candidates: &[String],
    logical_url: &str,
) -> Result<FetchedResponse, SweepError> {
    let mut last_error = String::from("no candidates");

    for candidate in candidates {
        match fetch_with_retry(
            client,
            throttle,
            candidate,
            config.max_attempts,
            config.request_timeout(),
            config.retry_backoff(),
        )
        .await
        {
            Ok(response) => return Ok(response),
            Err(e) => {
                tracing::debug!("Candidate {} failed: {}", candidate, e);
                last_error = e.to_string();
            }
        }
    }

    Err(SweepError::EscalationExhausted {
        url: logical_url.to_string(),
        message: last_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_variants_order_and_shape() {
        let url = Url::parse("https://www.example.com/a?b=1").unwrap();
        assert_eq!(
            direct_variants(&url),
            vec![
                "https://example.com/a?b=1",
                "https://www.example.com/a?b=1",
                "http://example.com/a?b=1",
                "http://www.example.com/a?b=1",
            ]
        );
    }

    #[test]
    fn test_direct_variants_bare_input() {
        let url = Url::parse("http://example.com/").unwrap();
        assert_eq!(
            direct_variants(&url),
            vec![
                "https://example.com/",
                "https://www.example.com/",
                "http://example.com/",
                "http://www.example.com/",
            ]
        );
    }

    #[test]
    fn test_direct_variants_preserve_port() {
        let url = Url::parse("http://example.com:8080/x").unwrap();
        let variants = direct_variants(&url);
        assert_eq!(variants[0], "https://example.com:8080/x");
        assert_eq!(variants[3], "http://www.example.com:8080/x");
    }

    #[test]
    fn test_proxy_variants_strip_scheme() {
        let url = Url::parse("https://www.example.com/page?x=1").unwrap();
        assert_eq!(
            proxy_variants(&url),
            vec![
                "https://r.jina.ai/http://www.example.com/page?x=1",
                "https://r.jina.ai/https://www.example.com/page?x=1",
            ]
        );
    }
}
