//! HTTP client construction
//!
//! All outbound requests share one reqwest client carrying a browser-like
//! identity and permissive accept headers. This is a policy choice to
//! reduce anti-bot rejection, not a correctness requirement.

use crate::config::FetchConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CACHE_CONTROL, PRAGMA};
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Browser-like identity sent with every request
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Accept header favoring XML but permitting anything
const ACCEPT_VALUE: &str =
    "application/xml,text/xml,text/html;q=0.9,application/xhtml+xml;q=0.8,*/*;q=0.5";

/// Builds the shared HTTP client
///
/// Redirects are followed automatically up to 10 hops; redirect loops
/// surface as ordinary request errors. Transport-level gzip/brotli/deflate
/// is handled by reqwest; payload-level compression (e.g. `.gz` sitemap
/// files) is the decoder's job.
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

    Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .timeout(config.request_timeout())
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .build()
}
