// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Two subcommands:
// - links: fetch one page and print its same-host links (errors are fatal)
// - crawl: follow same-host links up to --max-depth hops (errors are logged)
// =============================================================================

use clap::{Args, Parser, Subcommand};
use std::time::Duration;

use crate::config::{default_user_agent, CrawlConfig, DEFAULT_TIMEOUT_SECS};

#[derive(Parser, Debug)]
#[command(
    name = "site-links",
    version,
    about = "List and crawl same-host links on a website",
    long_about = "site-links fetches a page, extracts the links that stay on the same host, \
                  and can follow them depth-first up to a bounded depth without revisiting pages."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the same-host links found on a single page
    ///
    /// Example: site-links links https://example.com
    Links {
        /// Page URL (e.g., https://example.com)
        url: String,

        /// Output the links as a JSON array instead of one per line
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        http: HttpArgs,
    },

    /// Crawl same-host links starting from a page
    ///
    /// Example: site-links crawl https://example.com --max-depth 3
    Crawl {
        /// Start URL (e.g., https://example.com)
        url: String,

        /// Maximum crawl depth
        ///
        /// Depth 0 = fetch nothing
        /// Depth 1 = just the starting page
        /// Depth 2 = starting page + all pages it links to
        /// etc.
        #[arg(long, default_value_t = 2)]
        max_depth: usize,

        /// Output a JSON report instead of one URL per line
        #[arg(long)]
        json: bool,

        /// Stop the whole crawl after this many seconds
        #[arg(long, value_name = "SECS")]
        deadline: Option<u64>,

        #[command(flatten)]
        http: HttpArgs,
    },
}

/// HTTP settings shared by both subcommands
#[derive(Args, Debug)]
pub struct HttpArgs {
    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// User-Agent header to send
    #[arg(long, default_value_t = default_user_agent())]
    pub user_agent: String,
}

impl HttpArgs {
    // Builds the runtime config; `deadline` only exists for `crawl`
    pub fn to_config(&self, deadline: Option<u64>) -> CrawlConfig {
        CrawlConfig {
            timeout: Duration::from_secs(self.timeout),
            deadline: deadline.map(Duration::from_secs),
            user_agent: self.user_agent.clone(),
        }
    }
}
