// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Depth-first crawling starting from a URL
// - Same-host restriction (never leaves the starting site)
// - Depth budget: each hop spends one level
// - Every URL fetched at most once per Crawler
// - Optional overall deadline on top of the per-request timeout
//
// Rust concepts:
// - Async programming: the fetches are awaited one after another
// - Collections: HashSet for tracking visited URLs, Vec as a stack
// =============================================================================

mod crawler;

// Re-export the crawler and its report types
pub use crawler::{CrawlReport, Crawler};
