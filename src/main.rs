//! Sitesweep main entry point
//!
//! Command-line interface for sitemap discovery/expansion and single-page
//! retrieval.

use clap::{Parser, Subcommand};
use sitesweep::config::load_config_or_default;
use sitesweep::fetch::{build_http_client, HostThrottle};
use sitesweep::page::retrieve_page;
use sitesweep::sitemap::map_site;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Sitesweep: resilient sitemap discovery and expansion
#[derive(Parser, Debug)]
#[command(name = "sitesweep")]
#[command(version)]
#[command(about = "Expand a site's sitemap tree into its page URLs", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used without one)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Discover and expand a site's sitemaps into a JSON URL report
    Map {
        /// Domain or absolute URL of the site
        target: String,

        /// Maximum number of page URLs to collect
        #[arg(short, long)]
        limit: Option<usize>,

        /// Drain every wave fully instead of short-circuiting at the limit
        #[arg(long)]
        thorough: bool,
    },

    /// Fetch a single page, escalating through URL variants and the proxy
    Fetch {
        /// URL of the page to retrieve
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_config_or_default(cli.config.as_deref())?;
    let client = build_http_client(&config.fetch)?;
    let throttle = Arc::new(HostThrottle::new(config.fetch.throttle_interval()));

    match cli.command {
        Command::Map {
            target,
            limit,
            thorough,
        } => {
            let fast = if thorough { Some(false) } else { None };
            let report = map_site(&client, &throttle, &config, &target, limit, fast).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Command::Fetch { url } => match retrieve_page(&client, &throttle, &config, &url).await {
            Ok(page) => {
                tracing::info!("Upstream {} ({})", page.status, page.content_type);
                println!("{}", page.body);
            }
            Err(e) => {
                // The HTTP layer would answer 502 here; the CLI keeps the shape.
                eprintln!("Proxy error: {}", e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitesweep=info,warn"),
            1 => EnvFilter::new("sitesweep=debug,info"),
            2 => EnvFilter::new("sitesweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}
