use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for sitesweep
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub crawl: CrawlConfig,
}

/// HTTP fetch behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Maximum GET attempts per URL before giving up
    #[serde(rename = "max-attempts", default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Per-attempt timeout (milliseconds)
    #[serde(rename = "request-timeout-ms", default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Base delay for the retry backoff; the wait grows linearly with the
    /// attempt index (milliseconds)
    #[serde(rename = "retry-backoff-ms", default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Minimum spacing between requests to the same host (milliseconds)
    #[serde(rename = "throttle-interval-ms", default = "default_throttle_interval_ms")]
    pub throttle_interval_ms: u64,
}

/// Sitemap expansion behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Number of sitemap fetches dispatched concurrently per wave
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Page URL limit applied when the caller does not pass one
    #[serde(rename = "default-limit", default = "default_default_limit")]
    pub default_limit: usize,

    /// Hard ceiling on any caller-supplied limit
    #[serde(rename = "max-limit", default = "default_max_limit")]
    pub max_limit: usize,

    /// Stop accumulating mid-wave once the limit is reached
    #[serde(default = "default_fast")]
    pub fast: bool,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_request_timeout_ms() -> u64 {
    12_000
}

fn default_retry_backoff_ms() -> u64 {
    300
}

fn default_throttle_interval_ms() -> u64 {
    250
}

fn default_concurrency() -> usize {
    16
}

fn default_default_limit() -> usize {
    5_000
}

fn default_max_limit() -> usize {
    20_000
}

fn default_fast() -> bool {
    true
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            request_timeout_ms: default_request_timeout_ms(),
            retry_backoff_ms: default_retry_backoff_ms(),
            throttle_interval_ms: default_throttle_interval_ms(),
        }
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            default_limit: default_default_limit(),
            max_limit: default_max_limit(),
            fast: default_fast(),
        }
    }
}

impl FetchConfig {
    /// Per-attempt timeout as a [`Duration`]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Backoff base as a [`Duration`]
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    /// Throttle spacing as a [`Duration`]
    pub fn throttle_interval(&self) -> Duration {
        Duration::from_millis(self.throttle_interval_ms)
    }
}
