// src/config.rs
// =============================================================================
// Runtime settings shared by the fetcher and the crawler.
//
// There are no config files: everything comes from command-line flags (see
// cli.rs) and gets bundled into a CrawlConfig. The log level is the only
// setting read from the environment (RUST_LOG, handled in main.rs).
// =============================================================================

use std::time::Duration;

/// Per-request timeout used when no --timeout flag is given
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings for one crawl run
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Upper bound for a single fetch (connect + headers + body)
    pub timeout: Duration,
    /// Upper bound for the whole crawl; None means no limit
    pub deadline: Option<Duration>,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            deadline: None,
            user_agent: default_user_agent(),
        }
    }
}

/// "site-links/<version>", taken from Cargo.toml at compile time
pub fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
