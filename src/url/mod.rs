//! URL handling module
//!
//! Origin normalization, host extraction for throttle keys, and the
//! escalation resolver that enumerates protocol/www variants and the
//! rendering-proxy fallback.

mod escalate;

pub use escalate::{direct_variants, fetch_escalated, proxy_variants, RENDER_PROXY};

use crate::UrlError;
use url::Url;

/// Normalizes user input (a domain or an absolute URL) to an origin
///
/// The result is `scheme://host[:port]` with no trailing slash. Bare
/// domains get an `https://` prefix; hosts are lowercased by the parser.
///
/// # Examples
///
/// ```
/// use sitesweep::url::normalize_origin;
///
/// assert_eq!(normalize_origin("Example.com/").unwrap(), "https://example.com");
/// assert_eq!(
///     normalize_origin("http://example.com/deep/path").unwrap(),
///     "http://example.com"
/// );
/// ```
pub fn normalize_origin(input: &str) -> Result<String, UrlError> {
    let url = coerce_to_url(input)?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    let host = url.host_str().ok_or(UrlError::MissingHost)?;
    let origin = match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    };

    Ok(origin)
}

/// Parses user input into a URL, coercing schemeless input to https
///
/// Inputs like `example.com:8080/x` would otherwise parse with
/// `example.com` as the scheme, so anything without an explicit `://` is
/// re-parsed with an `https://` prefix.
pub fn coerce_to_url(input: &str) -> Result<Url, UrlError> {
    let trimmed = input.trim();

    if trimmed.contains("://") {
        return Url::parse(trimmed).map_err(|e| UrlError::Parse(e.to_string()));
    }

    let stripped = trimmed.trim_end_matches('/');
    Url::parse(&format!("https://{}", stripped)).map_err(|e| UrlError::Parse(e.to_string()))
}

/// Extracts the throttle key (host, with port when present) from a URL
///
/// Unparseable URLs fall back to the whole string so throttling still
/// applies to repeated requests for the same malformed target.
pub fn host_key(url: &str) -> String {
    match Url::parse(url) {
        Ok(u) => match (u.host_str(), u.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            _ => url.to_string(),
        },
        Err(_) => url.to_string(),
    }
}

/// Strips a single leading `www.` label from a host
pub fn bare_host(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}
