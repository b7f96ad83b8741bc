//! Sitemap seed discovery
//!
//! robots.txt is the authoritative place for a site to declare its
//! sitemaps; when it is unreachable or declares none, a fixed set of
//! conventional paths is probed instead.

use crate::config::FetchConfig;
use crate::fetch::{decode_body, HostThrottle};
use crate::url::{direct_variants, fetch_escalated};
use reqwest::Client;
use url::Url;

/// Conventional sitemap locations probed when robots.txt yields nothing
pub const FALLBACK_SITEMAP_PATHS: &[&str] =
    &["/sitemap.xml", "/sitemap_index.xml", "/wp-sitemap.xml"];

/// Extracts `Sitemap:` directive values from robots.txt, in file order
///
/// The directive name is matched case-insensitively; the value is the
/// first whitespace-delimited token after the colon.
pub fn sitemap_urls_from_robots(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            let (directive, value) = trimmed.split_once(':')?;
            if directive.trim().eq_ignore_ascii_case("sitemap") {
                let url = value.split_whitespace().next()?;
                Some(url.to_string())
            } else {
                None
            }
        })
        .collect()
}

/// The conventional sitemap URLs for an origin, in probe order
pub fn fallback_sitemap_urls(origin: &str) -> Vec<String> {
    FALLBACK_SITEMAP_PATHS
        .iter()
        .map(|path| format!("{}{}", origin, path))
        .collect()
}

/// Discovers the seed sitemap URLs for an origin
///
/// Fetches `robots.txt` through the direct-variant escalation (never the
/// rendering proxy) and returns its declared sitemaps. An unreachable
/// robots.txt, or one declaring no sitemaps, degrades to the conventional
/// paths rather than failing the operation.
pub async fn discover_seeds(
    client: &Client,
    throttle: &HostThrottle,
    config: &FetchConfig,
    origin: &str,
) -> Vec<String> {
    let robots_url = format!("{}/robots.txt", origin);

    let candidates = match Url::parse(&robots_url) {
        Ok(parsed) => direct_variants(&parsed),
        Err(_) => vec![robots_url.clone()],
    };

    match fetch_escalated(client, throttle, config, &candidates, &robots_url).await {
        Ok(response) => {
            let text = decode_body(
                &response.body,
                response.content_encoding(),
                response.content_type(),
                &response.final_url,
            );
            let declared = sitemap_urls_from_robots(&text);
            if declared.is_empty() {
                tracing::info!("robots.txt at {} declares no sitemaps, probing conventional paths", origin);
                fallback_sitemap_urls(origin)
            } else {
                tracing::info!("robots.txt declared {} sitemap(s) for {}", declared.len(), origin);
                declared
            }
        }
        Err(e) => {
            tracing::warn!("robots.txt unreachable for {}: {}", origin, e);
            fallback_sitemap_urls(origin)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_sitemap_lines_in_order() {
        let robots = "User-agent: *\nDisallow: /admin\nSitemap: https://example.com/a.xml\nsitemap: https://example.com/b.xml\n";
        assert_eq!(
            sitemap_urls_from_robots(robots),
            vec!["https://example.com/a.xml", "https://example.com/b.xml"]
        );
    }

    #[test]
    fn test_extract_tolerates_leading_whitespace() {
        let robots = "  SITEMAP:   https://example.com/s.xml   trailing junk\n";
        assert_eq!(
            sitemap_urls_from_robots(robots),
            vec!["https://example.com/s.xml"]
        );
    }

    #[test]
    fn test_no_sitemap_lines() {
        let robots = "User-agent: *\nAllow: /\n# Sitemap commented out\n";
        assert!(sitemap_urls_from_robots(robots).is_empty());
    }

    #[test]
    fn test_fallback_order() {
        let urls = fallback_sitemap_urls("https://example.com");
        assert_eq!(
            urls,
            vec![
                "https://example.com/sitemap.xml",
                "https://example.com/sitemap_index.xml",
                "https://example.com/wp-sitemap.xml",
            ]
        );
    }
}
