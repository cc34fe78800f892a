// src/crawl/crawler.rs
// =============================================================================
// This module implements bounded-depth, same-host website crawling.
//
// How it works:
// 1. Start with the initial URL on a stack, carrying the full depth budget
// 2. Pop a URL; skip it if its budget is 0 or it was already visited
// 3. Mark it visited *before* fetching, then fetch and parse the page
// 4. Push its same-host links with budget - 1 (in reverse, so the first
//    link is crawled first)
// 5. Repeat until the stack is empty or the deadline passes
//
// This is a depth-first walk: the explicit stack visits pages in exactly
// the order a recursive crawl(link, depth - 1) would, without recursion.
//
// Failures (bad status, network error, non-HTML) only end the branch they
// happen on. They are logged and recorded in the report; siblings still run.
// =============================================================================

use scraper::Html;
use serde::Serialize;
use std::collections::HashSet;
use std::time::{Duration, Instant};
use url::Url;

use crate::config::CrawlConfig;
use crate::error::CrawlError;
use crate::extract::extract_links;
use crate::fetch::PageFetcher;

// Represents a page waiting on the crawl stack
#[derive(Debug, Clone)]
struct CrawlItem {
    url: String,
    depth: usize, // Remaining link-following hops, including this page
}

/// What happened when we visited a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PageOutcome {
    /// Page fetched and parsed; `links` same-host links were found on it
    Fetched { links: usize },
    /// Fetch or parse failed, so this branch stopped here
    Failed { reason: String },
}

/// One visited page, in visit order
#[derive(Debug, Clone, Serialize)]
pub struct CrawledPage {
    pub url: String,
    /// Remaining depth budget when the page was visited
    pub depth: usize,
    #[serde(flatten)]
    pub outcome: PageOutcome,
}

impl CrawledPage {
    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, PageOutcome::Fetched { .. })
    }
}

/// Everything a crawl run produced
#[derive(Debug, Clone, Default, Serialize)]
pub struct CrawlReport {
    pub pages: Vec<CrawledPage>,
    /// True when the crawl stopped early because the deadline passed
    pub deadline_reached: bool,
}

impl CrawlReport {
    pub fn failed_count(&self) -> usize {
        self.pages.iter().filter(|page| !page.is_ok()).count()
    }
}

/// Crawl controller: owns the HTTP client and the visited set
///
/// The visited set lives as long as the Crawler, so calling crawl() twice on
/// the same value never refetches a URL. Create a new Crawler for a fresh run.
pub struct Crawler {
    fetcher: PageFetcher,
    deadline: Option<Duration>,
    visited: HashSet<String>,
}

impl Crawler {
    pub fn new(config: &CrawlConfig) -> Result<Self, CrawlError> {
        Ok(Self {
            fetcher: PageFetcher::new(config)?,
            deadline: config.deadline,
            visited: HashSet::new(),
        })
    }

    /// URLs marked visited so far (including ones whose fetch failed)
    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }

    // Crawls a website starting from a URL
    //
    // Parameters:
    //   start_url: The URL to start crawling from
    //   max_depth: Hop budget (0 = fetch nothing, 1 = just the start page,
    //              2 = start page + the pages it links to, ...)
    //
    // Returns: a report of every visited page, in visit order
    pub async fn crawl(&mut self, start_url: &str, max_depth: usize) -> CrawlReport {
        let started = Instant::now();
        let mut report = CrawlReport::default();

        // Store the start URL in the same normalized form as extracted links
        // ("https://a.com" -> "https://a.com/"), so a link back to it is a
        // visited-set hit. An unparsable start URL is kept as typed and fails
        // in visit() like any other bad URL.
        let start = match Url::parse(start_url) {
            Ok(url) => url.to_string(),
            Err(_) => start_url.to_string(),
        };

        let mut stack = vec![CrawlItem {
            url: start,
            depth: max_depth,
        }];

        while let Some(item) = stack.pop() {
            // Out of budget: no fetch, and the URL is not marked visited
            if item.depth == 0 {
                continue;
            }

            if self.visited.contains(&item.url) {
                tracing::debug!("Skipping already visited URL: {}", item.url);
                continue;
            }

            if let Some(deadline) = self.deadline {
                if started.elapsed() >= deadline {
                    tracing::warn!(
                        "Crawl deadline of {:?} reached, stopping with {} page(s) left on the stack",
                        deadline,
                        stack.len() + 1
                    );
                    report.deadline_reached = true;
                    break;
                }
            }

            self.visited.insert(item.url.clone());

            tracing::info!("Crawling [depth {}]: {}", item.depth, item.url);

            let result = self.visit(&item.url).await;

            match result {
                Ok(links) => {
                    report.pages.push(CrawledPage {
                        url: item.url,
                        depth: item.depth,
                        outcome: PageOutcome::Fetched { links: links.len() },
                    });

                    // Reversed so the first link on the page is popped first
                    for link in links.into_iter().rev() {
                        if !self.visited.contains(&link) {
                            stack.push(CrawlItem {
                                url: link,
                                depth: item.depth - 1,
                            });
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to crawl {}: {}", item.url, e);
                    report.pages.push(CrawledPage {
                        url: item.url,
                        depth: item.depth,
                        outcome: PageOutcome::Failed {
                            reason: e.to_string(),
                        },
                    });
                }
            }
        }

        tracing::info!(
            "Crawl finished: {} page(s) visited, {} failed, {:.2}s",
            report.pages.len(),
            report.failed_count(),
            started.elapsed().as_secs_f64()
        );

        report
    }

    // Fetches one page and returns its same-host links
    async fn visit(&self, url: &str) -> Result<Vec<String>, CrawlError> {
        // The page URL doubles as the base for relative links
        let base = Url::parse(url).map_err(|source| CrawlError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let html = self.fetcher.fetch_page(&base).await?;
        Ok(extract_page_links(&html, &base))
    }
}

// Parsing stays in a plain fn so the document never lives across an .await
fn extract_page_links(html: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    extract_links(&document, base)
}
