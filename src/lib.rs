//! Sitesweep: resilient sitemap discovery and expansion
//!
//! This crate discovers a site's published page URLs by locating, fetching,
//! decoding and recursively expanding XML-style sitemap documents (including
//! sitemap indexes and gzip-compressed children), while tolerating slow or
//! hostile upstream servers.

pub mod config;
pub mod fetch;
pub mod page;
pub mod sitemap;
pub mod url;

use thiserror::Error;

/// Main error type for sitesweep operations
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("All fetch attempts failed for {url}: {message}")]
    FetchExhausted { url: String, message: String },

    #[error("All escalation candidates failed for {url}: {message}")]
    EscalationExhausted { url: String, message: String },

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for sitesweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use fetch::{build_http_client, fetch_with_retry, FetchedResponse, HostThrottle};
pub use page::{retrieve_page, PageContent};
pub use sitemap::{map_site, MapReport, SitemapDocument, SitemapKind};
pub use url::normalize_origin;
