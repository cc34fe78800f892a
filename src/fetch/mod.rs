// src/fetch/mod.rs
// =============================================================================
// This module downloads pages over HTTP.
//
// Submodules:
// - page: a reusable reqwest client plus the fetch_page() call
// =============================================================================

mod page;

pub use page::PageFetcher;
