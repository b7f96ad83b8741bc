//! Configuration module for sitesweep
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every tunable has a built-in default so a config file is optional.
//!
//! # Example
//!
//! ```no_run
//! use sitesweep::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sitesweep.toml")).unwrap();
//! println!("Wave width: {}", config.crawl.concurrency);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlConfig, FetchConfig};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default};

pub use validation::validate;
