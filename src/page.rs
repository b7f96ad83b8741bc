//! Single-page content retrieval
//!
//! Fetches one page through the full escalation ladder: the four direct
//! protocol/www variants first, then the read-only rendering proxy for
//! pages that block direct fetches. This mode is for page content only;
//! sitemap fetches never use the proxy.

use crate::config::Config;
use crate::fetch::{decode_body, FetchedResponse, HostThrottle};
use crate::url::{direct_variants, fetch_escalated, proxy_variants};
use crate::{Result, UrlError};
use reqwest::Client;
use url::Url;

/// Fallback content type for non-textual upstream responses
const PLAIN_TEXT: &str = "text/plain; charset=utf-8";

/// A retrieved page body with its upstream status and content type
#[derive(Debug)]
pub struct PageContent {
    /// Upstream HTTP status
    pub status: u16,
    /// Upstream content type when textual/XML/JSON/HTML, else text/plain
    pub content_type: String,
    /// Decoded body text
    pub body: String,
}

/// Retrieves a page, escalating through URL variants and the proxy
///
/// # Returns
///
/// * `Ok(PageContent)` - First escalation candidate that answered 2xx
/// * `Err(SweepError::EscalationExhausted)` - Every variant and proxy
///   fallback failed; carries the last error message
pub async fn retrieve_page(
    client: &Client,
    throttle: &HostThrottle,
    config: &Config,
    raw_url: &str,
) -> Result<PageContent> {
    let url = parse_page_url(raw_url)?;

    let mut candidates = direct_variants(&url);
    candidates.extend(proxy_variants(&url));

    let response = fetch_escalated(client, throttle, &config.fetch, &candidates, raw_url).await?;

    Ok(page_content(response))
}

/// Parses the target, prefixing `https://` onto schemeless input
fn parse_page_url(raw: &str) -> std::result::Result<Url, UrlError> {
    crate::url::coerce_to_url(raw)
}

fn page_content(response: FetchedResponse) -> PageContent {
    let upstream_type = response.content_type().to_string();
    let content_type = if is_textual(&upstream_type) {
        upstream_type.clone()
    } else {
        PLAIN_TEXT.to_string()
    };

    let body = decode_body(
        &response.body,
        response.content_encoding(),
        &upstream_type,
        &response.final_url,
    );

    PageContent {
        status: response.status,
        content_type,
        body,
    }
}

/// Whether an upstream content type is safe to pass through as-is
fn is_textual(content_type: &str) -> bool {
    let ct = content_type.to_ascii_lowercase();
    ct.contains("xml") || ct.contains("html") || ct.contains("text") || ct.contains("json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderMap, HeaderValue};

    fn response_with_type(content_type: &str, body: &[u8]) -> FetchedResponse {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_str(content_type).unwrap());
        FetchedResponse {
            status: 200,
            headers,
            final_url: "https://example.com/page".to_string(),
            body: body.to_vec(),
        }
    }

    #[test]
    fn test_textual_content_type_passthrough() {
        let page = page_content(response_with_type("application/json; charset=utf-8", b"{}"));
        assert_eq!(page.content_type, "application/json; charset=utf-8");
        assert_eq!(page.body, "{}");
    }

    #[test]
    fn test_binary_content_type_replaced() {
        let page = page_content(response_with_type("application/octet-stream", b"blob"));
        assert_eq!(page.content_type, PLAIN_TEXT);
    }

    #[test]
    fn test_parse_page_url_prefixes_scheme() {
        let url = parse_page_url("example.com/deep?q=1").unwrap();
        assert_eq!(url.as_str(), "https://example.com/deep?q=1");
    }

    #[test]
    fn test_is_textual() {
        assert!(is_textual("text/html"));
        assert!(is_textual("application/xhtml+xml"));
        assert!(is_textual("application/json"));
        assert!(!is_textual("image/png"));
        assert!(!is_textual(""));
    }
}
