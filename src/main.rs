// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (tracing, to stderr)
// 2. Parse command-line arguments using clap
// 3. Dispatch to the appropriate subcommand handler
// 4. Print results on stdout
// 5. Exit with proper code (0 = success, 1 = fatal error, 2 = bad arguments)
//
// stdout only ever carries results (URLs or JSON), so the output can be
// piped into other tools. Progress and warnings go through tracing to stderr.
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - runtime settings
mod crawl; // src/crawl/ - depth-first same-host crawling
mod error; // src/error.rs - typed fetch/crawl errors
mod extract; // src/extract/ - link extraction from HTML
mod fetch; // src/fetch/ - HTTP page fetching

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;
use url::Url;

use cli::{Cli, Commands};
use config::CrawlConfig;
use crawl::{CrawlReport, Crawler};
use error::CrawlError;
use fetch::PageFetcher;

#[tokio::main]
async fn main() {
    init_tracing();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // Fatal errors (only the single-page `links` command has them)
            eprintln!("Error: {}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr; RUST_LOG=debug shows skipped hrefs and duplicates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<i32> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return handle_parse_error(e),
    };

    match cli.command {
        Commands::Links { url, json, http } => handle_links(&url, json, &http.to_config(None)).await,
        Commands::Crawl {
            url,
            max_depth,
            json,
            deadline,
            http,
        } => handle_crawl(&url, max_depth, json, &http.to_config(deadline)).await,
    }
}

// Running without a subcommand or without a URL is not an error: we just
// show how to use the tool on stdout and exit 0. Everything else (unknown
// flags, bad numbers, --help, --version) keeps clap's own output.
fn handle_parse_error(e: clap::Error) -> Result<i32> {
    if shows_usage(&e) {
        Cli::command().print_help()?;
        println!();
    } else {
        e.print()?;
    }
    Ok(parse_error_exit_code(&e))
}

fn shows_usage(e: &clap::Error) -> bool {
    matches!(
        e.kind(),
        ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            | ErrorKind::MissingSubcommand
            | ErrorKind::MissingRequiredArgument
    )
}

// 0 for a missing subcommand/URL, clap's own code otherwise
// (0 for --help/--version, 2 for bad arguments)
fn parse_error_exit_code(e: &clap::Error) -> i32 {
    if shows_usage(e) {
        0
    } else {
        e.exit_code()
    }
}

// Handles the 'links' subcommand
//
// Single page, no crawling. Any failure (bad URL, network, HTTP status,
// non-HTML response) is fatal and ends the process with exit code 1.
async fn handle_links(url: &str, json: bool, config: &CrawlConfig) -> Result<i32> {
    let page_url = Url::parse(url).map_err(|source| CrawlError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;

    tracing::info!("Fetching {}", page_url);

    let fetcher = PageFetcher::new(config)?;
    let html = fetcher.fetch_page(&page_url).await?;

    let links = extract::extract_html_links(&html, page_url.as_str());
    tracing::info!("{} same-host link(s) found on {}", links.len(), page_url);

    if json {
        println!("{}", serde_json::to_string_pretty(&links)?);
    } else {
        for link in &links {
            println!("{}", link);
        }
    }

    Ok(0)
}

// Handles the 'crawl' subcommand
//
// Failures inside the crawl only end their own branch and are logged, so
// this always exits 0 once the crawl has run.
async fn handle_crawl(
    url: &str,
    max_depth: usize,
    json: bool,
    config: &CrawlConfig,
) -> Result<i32> {
    tracing::info!("Crawling {} (max depth {})", url, max_depth);

    let mut crawler = Crawler::new(config)?;
    let report = crawler.crawl(url, max_depth).await;
    tracing::info!(
        "{} URL(s) visited, {} failed",
        crawler.visited().len(),
        report.failed_count()
    );

    print_report(&report, json)?;

    Ok(0)
}

// Prints the crawl report either as plain URLs or JSON
//
// Plain output lists the pages that were fetched successfully, one per
// line in visit order. Failed pages were already logged to stderr.
// JSON output includes every visited page with its outcome.
fn print_report(report: &CrawlReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        for page in report.pages.iter().filter(|page| page.is_ok()) {
            println!("{}", page.url);
        }
    }
    Ok(())
}
