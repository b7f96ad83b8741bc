//! Crawl orchestrator: bounded-concurrency sitemap tree expansion
//!
//! Breadth-first expansion over an explicit frontier queue. Each wave
//! dispatches up to the configured width of not-yet-visited sitemap URLs
//! concurrently; results are consumed in wave order, so the collected
//! output and the set of newly queued children are deterministic for a
//! given upstream even though fetch completion order is not. Per-node
//! failures are logged and yield an empty document; one unreachable child
//! never aborts the crawl of its siblings.

use crate::config::Config;
use crate::fetch::{decode_body, fetch_with_retry, HostThrottle};
use crate::sitemap::parse::{parse_sitemap, SitemapDocument, SitemapKind};
use futures::StreamExt;
use reqwest::Client;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

/// State owned by one expansion call, never shared across crawls
struct CrawlState {
    /// URLs already dequeued for fetching; only ever grows
    visited: HashSet<String>,
    /// FIFO queue of sitemap URLs awaiting expansion
    frontier: VecDeque<String>,
    /// Leaf page URLs in discovery order
    collected: Vec<String>,
    /// Output-size ceiling
    limit: usize,
}

impl CrawlState {
    fn new(seeds: &[String], limit: usize) -> Self {
        Self {
            visited: HashSet::new(),
            frontier: seeds.iter().cloned().collect(),
            collected: Vec::new(),
            limit,
        }
    }

    /// Dequeues up to `width` not-yet-visited URLs, marking them visited
    fn draw_wave(&mut self, width: usize) -> Vec<String> {
        let mut wave = Vec::new();
        while wave.len() < width {
            match self.frontier.pop_front() {
                Some(url) => {
                    if self.visited.insert(url.clone()) {
                        wave.push(url);
                    }
                }
                None => break,
            }
        }
        wave
    }

    /// Queues an index child unless it was already seen or queued
    fn queue_child(&mut self, child: String) {
        if !self.visited.contains(&child) && !self.frontier.contains(&child) {
            self.frontier.push_back(child);
        }
    }
}

/// Expands sitemap trees into page URLs
pub struct Expander {
    client: Client,
    throttle: Arc<HostThrottle>,
    config: Config,
}

impl Expander {
    pub fn new(client: Client, throttle: Arc<HostThrottle>, config: Config) -> Self {
        Self {
            client,
            throttle,
            config,
        }
    }

    /// Expands the given seed sitemap URLs into at most `limit` page URLs
    ///
    /// In fast mode the wave stream stops being consumed the moment the
    /// limit is reached, which drops (and thereby cancels) the wave's
    /// still-in-flight fetches. Thorough mode drains each wave before
    /// checking the limit, so siblings of the entry that crossed the line
    /// still contribute queued children.
    pub async fn expand(&self, seeds: &[String], limit: usize, fast: bool) -> Vec<String> {
        let width = self.config.crawl.concurrency.max(1);
        let mut state = CrawlState::new(seeds, limit);
        let mut wave_number = 0u32;

        'crawl: while state.collected.len() < state.limit {
            let wave = state.draw_wave(width);
            if wave.is_empty() {
                break;
            }
            wave_number += 1;
            tracing::debug!(
                "Wave {}: {} sitemap(s), {} collected, {} in frontier",
                wave_number,
                wave.len(),
                state.collected.len(),
                state.frontier.len()
            );

            let fetches = wave.iter().map(|url| self.fetch_and_parse(url.clone()));
            let mut results = futures::stream::iter(fetches).buffered(width);

            while let Some((url, doc)) = results.next().await {
                match doc.kind {
                    SitemapKind::Index => {
                        tracing::debug!("{} is an index with {} children", url, doc.entries.len());
                        for child in doc.entries {
                            state.queue_child(child);
                        }
                    }
                    SitemapKind::UrlSet => {
                        tracing::debug!("{} is a urlset with {} entries", url, doc.entries.len());
                        for loc in doc.entries {
                            if state.collected.len() >= state.limit {
                                break;
                            }
                            state.collected.push(loc);
                        }
                    }
                    SitemapKind::Unknown => {
                        tracing::debug!("{} is not a recognizable sitemap", url);
                    }
                }

                if fast && state.collected.len() >= state.limit {
                    // Dropping the stream cancels the wave's remaining fetches.
                    break 'crawl;
                }
            }
        }

        tracing::info!(
            "Expansion finished: {} page URL(s) from {} sitemap fetch(es)",
            state.collected.len(),
            state.visited.len()
        );

        state.collected
    }

    /// Fetches and classifies one sitemap URL; failures yield an empty doc
    async fn fetch_and_parse(&self, url: String) -> (String, SitemapDocument) {
        let fetch = fetch_with_retry(
            &self.client,
            &self.throttle,
            &url,
            self.config.fetch.max_attempts,
            self.config.fetch.request_timeout(),
            self.config.fetch.retry_backoff(),
        )
        .await;

        match fetch {
            Ok(response) => {
                let text = decode_body(
                    &response.body,
                    response.content_encoding(),
                    response.content_type(),
                    &response.final_url,
                );
                (url, parse_sitemap(&text))
            }
            Err(e) => {
                tracing::warn!("Skipping sitemap {}: {}", url, e);
                (url, SitemapDocument::empty())
            }
        }
    }
}
