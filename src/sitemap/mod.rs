//! Sitemap discovery and expansion module
//!
//! This module contains the sitemap-facing logic:
//! - Best-effort document classification and `<loc>` extraction
//! - Seed discovery via robots.txt with conventional-path fallback
//! - Bounded-concurrency breadth-first tree expansion
//! - The `map_site` entry point tying them together

mod expander;
mod parse;
mod robots;

pub use expander::Expander;
pub use parse::{parse_sitemap, SitemapDocument, SitemapKind};
pub use robots::{
    discover_seeds, fallback_sitemap_urls, sitemap_urls_from_robots, FALLBACK_SITEMAP_PATHS,
};

use crate::config::Config;
use crate::fetch::HostThrottle;
use crate::url::normalize_origin;
use crate::Result;
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;

/// Result of a site mapping operation
#[derive(Debug, Serialize)]
pub struct MapReport {
    pub ok: bool,
    /// Normalized scheme+host, no trailing slash
    pub origin: String,
    /// Number of page URLs collected
    pub count: usize,
    /// Effective limit after clamping
    pub limit: usize,
    /// Collected page URLs, insertion order preserved
    pub urls: Vec<String>,
}

/// Discovers and expands a site's sitemaps into a list of page URLs
///
/// Normalizes `input` to an origin, clamps `limit` to the configured hard
/// cap, discovers seed sitemaps (robots.txt, then conventional paths) and
/// runs one expansion over all seeds with a shared visited set, so a
/// sitemap referenced from multiple trees is fetched once.
///
/// # Arguments
///
/// * `input` - A domain or absolute URL identifying the site
/// * `limit` - Optional output ceiling; defaults from config
/// * `fast` - Optional mid-wave short-circuit override; defaults from config
pub async fn map_site(
    client: &Client,
    throttle: &Arc<HostThrottle>,
    config: &Config,
    input: &str,
    limit: Option<usize>,
    fast: Option<bool>,
) -> Result<MapReport> {
    let origin = normalize_origin(input)?;
    let limit = limit
        .unwrap_or(config.crawl.default_limit)
        .min(config.crawl.max_limit)
        .max(1);
    let fast = fast.unwrap_or(config.crawl.fast);

    tracing::info!("Mapping {} (limit {}, fast {})", origin, limit, fast);

    let seeds = discover_seeds(client, throttle, &config.fetch, &origin).await;
    tracing::debug!("Seed sitemaps: {:?}", seeds);

    let expander = Expander::new(client.clone(), Arc::clone(throttle), config.clone());
    let urls = expander.expand(&seeds, limit, fast).await;

    Ok(MapReport {
        ok: true,
        origin,
        count: urls.len(),
        limit,
        urls,
    })
}
